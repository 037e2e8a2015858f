use crate::world::{DrawCommand, StepOutcome};

use super::input::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Game-side logic driven by the fixed-timestep loop.
///
/// `update` runs once per tick; `fill_draw_list` runs once per rendered
/// frame and must leave `out` holding the full frame in draw order.
/// `last_step` exposes the movement result of the latest `update` to the
/// loop metrics.
pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, input: &InputSnapshot) -> SceneCommand;
    fn fill_draw_list(&self, out: &mut Vec<DrawCommand>);
    fn unload(&mut self) {}
    fn last_step(&self) -> Option<&StepOutcome> {
        None
    }
    fn debug_title(&self) -> Option<String> {
        None
    }
}

/// Owns the single active scene and its load state.
pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load();
        self.is_loaded = true;
    }

    pub(crate) fn update(&mut self, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        self.scene.update(input)
    }

    pub(crate) fn fill_draw_list(&self, out: &mut Vec<DrawCommand>) {
        self.scene.fill_draw_list(out);
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title()
    }

    pub(crate) fn last_step(&self) -> Option<&StepOutcome> {
        self.scene.last_step()
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload();
            self.is_loaded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::app::InputAction;
    use crate::world::PixelPos;

    #[derive(Default)]
    struct Counters {
        loads: Cell<u32>,
        updates: Cell<u32>,
        unloads: Cell<u32>,
    }

    struct CountingScene {
        counters: Rc<Counters>,
    }

    impl Scene for CountingScene {
        fn load(&mut self) {
            self.counters.loads.set(self.counters.loads.get() + 1);
        }

        fn update(&mut self, input: &InputSnapshot) -> SceneCommand {
            self.counters.updates.set(self.counters.updates.get() + 1);
            if input.is_down(InputAction::Quit) {
                SceneCommand::Quit
            } else {
                SceneCommand::None
            }
        }

        fn fill_draw_list(&self, out: &mut Vec<DrawCommand>) {
            out.clear();
            out.push(DrawCommand::Player {
                screen: PixelPos::new(1, 2),
            });
        }

        fn unload(&mut self) {
            self.counters.unloads.set(self.counters.unloads.get() + 1);
        }
    }

    fn runtime() -> (SceneRuntime, Rc<Counters>) {
        let counters = Rc::new(Counters::default());
        let scene = CountingScene {
            counters: Rc::clone(&counters),
        };
        (SceneRuntime::new(Box::new(scene)), counters)
    }

    #[test]
    fn load_is_idempotent_and_shutdown_unloads_once() {
        let (mut runtime, counters) = runtime();
        runtime.load();
        runtime.load();
        runtime.shutdown();
        runtime.shutdown();
        assert_eq!(counters.loads.get(), 1);
        assert_eq!(counters.unloads.get(), 1);
    }

    #[test]
    fn quit_request_short_circuits_update() {
        let (mut runtime, counters) = runtime();
        runtime.load();
        let quit = InputSnapshot::new(true, Default::default());
        assert_eq!(runtime.update(&quit), SceneCommand::Quit);
        assert_eq!(counters.updates.get(), 0);

        let held_quit = InputSnapshot::empty().with_action_down(InputAction::Quit, true);
        assert_eq!(runtime.update(&held_quit), SceneCommand::Quit);
        assert_eq!(runtime.update(&InputSnapshot::empty()), SceneCommand::None);
        assert_eq!(counters.updates.get(), 2);
    }

    #[test]
    fn draw_list_and_title_delegate_to_scene() {
        let (runtime, _) = runtime();
        let mut out = Vec::new();
        runtime.fill_draw_list(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(runtime.debug_title(), None);
        assert_eq!(runtime.last_step(), None);
    }
}
