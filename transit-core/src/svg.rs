use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub offset: Point,
    pub font_size: u32,
    pub bold: bool,
    pub content: String,
    pub fill: String,
    /// Подложка: цвет и толщина обводки
    pub underlayer: Option<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

/// Минимальный SVG-документ: объекты рисуются в порядке добавления
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // запись в String не падает
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" ?>"#)?;
        writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1">"#)?;
        for object in &self.objects {
            write!(out, "  ")?;
            match object {
                Object::Circle(c) => write_circle(out, c)?,
                Object::Polyline(p) => write_polyline(out, p)?,
                Object::Text(t) => write_text(out, t)?,
            }
            writeln!(out)?;
        }
        write!(out, "</svg>")
    }
}

fn write_circle(out: &mut String, c: &Circle) -> fmt::Result {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        c.center.x,
        c.center.y,
        c.radius,
        escape(&c.fill)
    )
}

fn write_polyline(out: &mut String, p: &Polyline) -> fmt::Result {
    let points: Vec<String> = p.points.iter().map(|pt| format!("{},{}", pt.x, pt.y)).collect();
    write!(
        out,
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        points.join(" "),
        escape(&p.stroke),
        p.stroke_width
    )
}

fn write_text(out: &mut String, t: &Text) -> fmt::Result {
    let weight = if t.bold { r#" font-weight="bold""# } else { "" };
    let head = format!(
        r#"x="{}" y="{}" dx="{}" dy="{}" font-size="{}" font-family="Verdana"{}"#,
        t.position.x, t.position.y, t.offset.x, t.offset.y, t.font_size, weight
    );
    let content = escape(&t.content);

    if let Some((color, width)) = &t.underlayer {
        let color = escape(color);
        write!(
            out,
            r#"<text fill="{color}" stroke="{color}" stroke-width="{width}" stroke-linecap="round" stroke-linejoin="round" {head}>{content}</text>"#
        )?;
        write!(out, "\n  ")?;
    }
    write!(out, r#"<text fill="{}" {head}>{content}</text>"#, escape(&t.fill))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
