// Optional real-time plotter collaborator (§6). Behavioural contract only; the core
// never depends on a concrete renderer existing, matching the out-of-scope GUI note in
// the purpose/scope section.

use crate::address::Address;

pub trait Scene {
    fn node(&mut self, gui: usize, x: f64, y: f64) {
        let _ = (gui, x, y);
    }

    fn nodecolor(&mut self, gui: usize, r: f64, g: f64, b: f64) {
        let _ = (gui, r, g, b);
    }

    fn addlink(&mut self, a: Address, b: Address, style: &str) {
        let _ = (a, b, style);
    }

    fn dellink(&mut self, a: Address, b: Address) {
        let _ = (a, b);
    }

    fn circle(&mut self, id: usize, x: f64, y: f64, radius: f64) {
        let _ = (id, x, y, radius);
    }

    fn line(&mut self, id: usize, x1: f64, y1: f64, x2: f64, y2: f64) {
        let _ = (id, x1, y1, x2, y2);
    }

    fn delshape(&mut self, id: usize) {
        let _ = id;
    }

    fn set_time(&mut self, t: f64) {
        let _ = t;
    }
}

/// No-op collaborator for headless runs.
pub struct NullScene;

impl Scene for NullScene {}
