use egui::{Color32, Pos2, Stroke as EguiStroke};

use crate::command::CommandId;
use crate::surface::Surface;

/// Freehand marker line
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: CommandId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    /// Start a stroke at `start`. A stroke always holds at least one point.
    pub fn begin(start: Pos2, thickness: f32, color: Color32) -> Self {
        Self {
            id: CommandId::new(),
            points: vec![start],
            color,
            thickness,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        // A lone point has no segment to draw
        if self.points.len() < 2 {
            return;
        }

        surface.polyline(&self.points, EguiStroke::new(self.thickness, self.color));
    }
}
