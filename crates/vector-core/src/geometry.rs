//! Converts parsed path commands into `kurbo` geometry.
//!
//! Relative coordinates are resolved here against the running current point, so the same
//! command list always produces the same path. Arcs are expanded into cubic segments.

use kurbo::{Arc, BezPath, Point, SvgArc, Vec2};
use vector_data::{CommandKind, PathCommand};

const ARC_TOLERANCE: f64 = 0.01;

/// Builds the full path for a command list from scratch.
pub fn build_path(commands: &[PathCommand]) -> BezPath {
    let mut builder = GeometryBuilder::default();
    for cmd in commands {
        builder.push(cmd);
    }
    builder.path
}

#[derive(Default)]
struct GeometryBuilder {
    path: BezPath,
    current: Point,
    // Last control point of a curve, used for S/T reflection.
    control: Point,
    subpath_start: Point,
    previous: Option<CommandKind>,
    open: bool,
}

impl GeometryBuilder {
    fn push(&mut self, cmd: &PathCommand) {
        for (index, p) in cmd.segments().enumerate() {
            self.push_segment(cmd.kind, cmd.relative, index, p);
            self.previous = Some(cmd.kind);
        }
    }

    fn resolve(&self, relative: bool, x: f32, y: f32) -> Point {
        let p = Point::new(x as f64, y as f64);
        if relative {
            self.current + p.to_vec2()
        } else {
            p
        }
    }

    fn ensure_open(&mut self) {
        if !self.open {
            self.path.move_to(self.current);
            self.subpath_start = self.current;
            self.open = true;
        }
    }

    fn line_to(&mut self, p: Point) {
        self.ensure_open();
        self.path.line_to(p);
        self.current = p;
        self.control = p;
    }

    fn push_segment(&mut self, kind: CommandKind, relative: bool, index: usize, p: &[f32]) {
        match kind {
            CommandKind::MoveTo => {
                let target = self.resolve(relative, p[0], p[1]);
                if index == 0 {
                    // Pairs after the first are implicit line-tos.
                    self.path.move_to(target);
                    self.subpath_start = target;
                    self.current = target;
                    self.control = target;
                    self.open = true;
                } else {
                    self.line_to(target);
                }
            }
            CommandKind::LineTo => {
                let target = self.resolve(relative, p[0], p[1]);
                self.line_to(target);
            }
            CommandKind::HorizontalLineTo => {
                let x = if relative {
                    self.current.x + p[0] as f64
                } else {
                    p[0] as f64
                };
                self.line_to(Point::new(x, self.current.y));
            }
            CommandKind::VerticalLineTo => {
                let y = if relative {
                    self.current.y + p[0] as f64
                } else {
                    p[0] as f64
                };
                self.line_to(Point::new(self.current.x, y));
            }
            CommandKind::CurveTo => {
                let c1 = self.resolve(relative, p[0], p[1]);
                let c2 = self.resolve(relative, p[2], p[3]);
                let end = self.resolve(relative, p[4], p[5]);
                self.cubic_to(c1, c2, end);
            }
            CommandKind::SmoothCurveTo => {
                let c1 = match self.previous {
                    Some(CommandKind::CurveTo | CommandKind::SmoothCurveTo) => self.reflected(),
                    _ => self.current,
                };
                let c2 = self.resolve(relative, p[0], p[1]);
                let end = self.resolve(relative, p[2], p[3]);
                self.cubic_to(c1, c2, end);
            }
            CommandKind::QuadTo => {
                let c = self.resolve(relative, p[0], p[1]);
                let end = self.resolve(relative, p[2], p[3]);
                self.quad_to(c, end);
            }
            CommandKind::SmoothQuadTo => {
                let c = match self.previous {
                    Some(CommandKind::QuadTo | CommandKind::SmoothQuadTo) => self.reflected(),
                    _ => self.current,
                };
                let end = self.resolve(relative, p[0], p[1]);
                self.quad_to(c, end);
            }
            CommandKind::ArcTo => {
                let end = self.resolve(relative, p[5], p[6]);
                self.arc_to(p, end);
            }
            CommandKind::ClosePath => {
                if self.open {
                    self.path.close_path();
                }
                self.current = self.subpath_start;
                self.control = self.subpath_start;
                self.open = false;
            }
        }
    }

    fn reflected(&self) -> Point {
        self.current + (self.current - self.control)
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.ensure_open();
        self.path.curve_to(c1, c2, end);
        self.control = c2;
        self.current = end;
    }

    fn quad_to(&mut self, c: Point, end: Point) {
        self.ensure_open();
        self.path.quad_to(c, end);
        self.control = c;
        self.current = end;
    }

    fn arc_to(&mut self, p: &[f32], end: Point) {
        if end == self.current {
            return;
        }
        let svg_arc = SvgArc {
            from: self.current,
            to: end,
            radii: Vec2::new(p[0].abs() as f64, p[1].abs() as f64),
            x_rotation: (p[2] as f64).to_radians(),
            large_arc: p[3] != 0.0,
            sweep: p[4] != 0.0,
        };
        match Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                self.ensure_open();
                for el in arc.append_iter(ARC_TOLERANCE) {
                    self.path.push(el);
                }
                self.current = end;
                self.control = end;
            }
            // Zero radii: the arc degrades to a straight line.
            None => self.line_to(end),
        }
    }
}
