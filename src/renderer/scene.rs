//! Scene drawing
//!
//! Pure readout of the game state: sky, bird (body, eye, beak), then every
//! pipe in spawn order. Nothing here mutates the state.

use glam::Vec2;

use super::Canvas2d;
use super::vertex::{Color, colors};
use crate::sim::{Bird, GameState, Pipe, Rect};

/// Eye center relative to the bird's top-left corner
const EYE_OFFSET: Vec2 = Vec2::new(30.0, 10.0);
const EYE_RADIUS: f32 = 5.0;
/// Beak triangle relative to the bird's top-left corner
const BEAK: [Vec2; 3] = [
    Vec2::new(40.0, 15.0),
    Vec2::new(50.0, 15.0),
    Vec2::new(40.0, 20.0),
];
/// How far the pipe lip sticks out on each side
const PIPE_LIP_OVERHANG: f32 = 5.0;
const PIPE_LIP_HEIGHT: f32 = 20.0;

/// Draw the whole frame
pub fn draw<C: Canvas2d + ?Sized>(state: &GameState, canvas: &mut C) {
    let tuning = &state.tuning;
    canvas.begin_frame();
    canvas.fill_rect(
        Rect::new(0.0, 0.0, tuning.canvas_width, tuning.canvas_height),
        colors::SKY,
    );

    draw_bird(&state.bird, canvas);

    for pipe in &state.pipes {
        draw_pipe(pipe, tuning.canvas_height, canvas);
    }
}

fn draw_bird<C: Canvas2d + ?Sized>(bird: &Bird, canvas: &mut C) {
    let origin = Vec2::new(bird.x, bird.y);
    canvas.fill_rect(bird.rect(), colors::BIRD);
    canvas.fill_circle(origin + EYE_OFFSET, EYE_RADIUS, colors::BIRD_EYE);
    canvas.fill_polygon(&BEAK.map(|p| origin + p), colors::BIRD_BEAK);
}

fn draw_pipe<C: Canvas2d + ?Sized>(pipe: &Pipe, canvas_height: f32, canvas: &mut C) {
    canvas.fill_rect(pipe.top_rect(), colors::PIPE);
    canvas.fill_rect(pipe.bottom_rect(canvas_height), colors::PIPE);

    // Lips at the gap edges
    let lip_x = pipe.x - PIPE_LIP_OVERHANG;
    let lip_w = pipe.width + 2.0 * PIPE_LIP_OVERHANG;
    canvas.fill_rect(
        Rect::new(lip_x, pipe.top_height - PIPE_LIP_HEIGHT, lip_w, PIPE_LIP_HEIGHT),
        colors::PIPE_EDGE,
    );
    canvas.fill_rect(
        Rect::new(lip_x, pipe.bottom_y, lip_w, PIPE_LIP_HEIGHT),
        colors::PIPE_EDGE,
    );
}

/// A recorded fill call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
}

/// Canvas that records the last frame's calls
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
    /// Frames drawn so far
    pub frames: u64,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas2d for CommandList {
    fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_empty_scene_is_sky_and_bird() {
        let state = GameState::new(Tuning::default(), 1).unwrap();
        let mut canvas = CommandList::new();
        draw(&state, &mut canvas);

        assert_eq!(canvas.frames, 1);
        assert_eq!(canvas.commands.len(), 4);
        assert_eq!(
            canvas.commands[0],
            DrawCommand::Rect {
                rect: Rect::new(0.0, 0.0, 400.0, 600.0),
                color: colors::SKY
            }
        );
        assert_eq!(
            canvas.commands[1],
            DrawCommand::Rect {
                rect: Rect::new(100.0, 300.0, 40.0, 30.0),
                color: colors::BIRD
            }
        );
        assert_eq!(
            canvas.commands[2],
            DrawCommand::Circle {
                center: Vec2::new(130.0, 310.0),
                radius: 5.0,
                color: colors::BIRD_EYE
            }
        );
        assert_eq!(
            canvas.commands[3],
            DrawCommand::Polygon {
                points: vec![
                    Vec2::new(140.0, 315.0),
                    Vec2::new(150.0, 315.0),
                    Vec2::new(140.0, 320.0)
                ],
                color: colors::BIRD_BEAK
            }
        );
    }

    #[test]
    fn test_pipes_drawn_in_spawn_order() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.pipes.push(Pipe::new(50.0, 60.0, 100.0, 150.0));
        state.pipes.push(Pipe::new(250.0, 60.0, 200.0, 150.0));
        let mut canvas = CommandList::new();
        draw(&state, &mut canvas);

        // sky + 3 bird parts + 4 per pipe
        assert_eq!(canvas.commands.len(), 12);
        let pipe_rects: Vec<Rect> = canvas.commands[4..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(pipe_rects[0], Rect::new(50.0, 0.0, 60.0, 100.0));
        assert_eq!(pipe_rects[1], Rect::new(50.0, 250.0, 60.0, 350.0));
        assert_eq!(pipe_rects[2], Rect::new(45.0, 80.0, 70.0, 20.0));
        assert_eq!(pipe_rects[3], Rect::new(45.0, 250.0, 70.0, 20.0));
        assert_eq!(pipe_rects[4].left(), 250.0);
    }

    #[test]
    fn test_drawing_does_not_touch_state() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.restart();
        state.pipes.push(Pipe::new(250.0, 60.0, 200.0, 150.0));
        let before = (state.bird.clone(), state.pipes.clone(), state.score);
        let mut canvas = CommandList::new();
        draw(&state, &mut canvas);
        draw(&state, &mut canvas);
        assert_eq!((state.bird.clone(), state.pipes.clone(), state.score), before);
        // Each frame replaces the previous recording
        assert_eq!(canvas.commands.len(), 8);
        assert_eq!(canvas.frames, 2);
    }
}
