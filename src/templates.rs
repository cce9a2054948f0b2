use askama::Template;

use crate::sweep::SweepResult;

pub struct Swatch {
    pub x: usize,
    pub color: String,
    pub class: String,
    pub title: String,
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ContrastReportTemplate<'a> {
    pub result: &'a SweepResult,
    pub swatches: Vec<Swatch>,
}

#[derive(Template)]
#[template(path = "palette.svg")]
pub struct PaletteSvgTemplate<'a> {
    pub result: &'a SweepResult,
    pub swatches: Vec<Swatch>,
    pub height: u32,
}
