mod palette;

use overworld_engine::{
    ContentError, DrawCommand, InputAction, InputSnapshot, Overworld, Scene, SceneCommand,
    StepOutcome, WorldConfig, WorldContent,
};
use tracing::{debug, info, warn};

pub(crate) use palette::sprite_table;

pub(crate) const WINDOW_TITLE: &str = "Pokémon FireRed-Inspired Overworld (Kanto)";
pub(crate) const KANTO_ORIGIN: &str = "kanto.json";
pub(crate) const KANTO_WORLD: &str = include_str!("../../../assets/kanto.json");

pub(crate) struct OverworldScene {
    world: Overworld,
    tick_count: u64,
    last_step: StepOutcome,
}

impl OverworldScene {
    pub(crate) fn from_content(
        content: WorldContent,
        config: WorldConfig,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            world: content.into_overworld(config)?,
            tick_count: 0,
            last_step: StepOutcome::default(),
        })
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &Overworld {
        &self.world
    }
}

impl Scene for OverworldScene {
    fn load(&mut self) {
        let player = self.world.player();
        info!(
            map = %player.map,
            x = player.position.x,
            y = player.position.y,
            map_count = self.world.registry().map_count(),
            "overworld_loaded"
        );
    }

    fn update(&mut self, input: &InputSnapshot) -> SceneCommand {
        if input.is_down(InputAction::Quit) {
            return SceneCommand::Quit;
        }

        self.tick_count = self.tick_count.saturating_add(1);
        self.last_step = self.world.tick(input.held_directions());
        let outcome = &self.last_step;
        let player = self.world.player();
        for transition in &outcome.transitions {
            info!(
                tick = self.tick_count,
                from = %transition.from,
                to = %transition.to,
                direction = %transition.direction,
                x = player.position.x,
                y = player.position.y,
                "map_transition"
            );
        }
        if outcome.blocked_horizontal || outcome.blocked_vertical {
            debug!(
                tick = self.tick_count,
                map = %player.map,
                blocked_horizontal = outcome.blocked_horizontal,
                blocked_vertical = outcome.blocked_vertical,
                "movement_blocked"
            );
        }
        SceneCommand::None
    }

    fn fill_draw_list(&self, out: &mut Vec<DrawCommand>) {
        if let Err(error) = self.world.fill_draw_list(out) {
            out.clear();
            warn!(error = %error, "draw_list_failed");
        }
    }

    fn unload(&mut self) {
        info!(ticks = self.tick_count, map = %self.world.player().map, "overworld_unloaded");
    }

    fn last_step(&self) -> Option<&StepOutcome> {
        Some(&self.last_step)
    }

    fn debug_title(&self) -> Option<String> {
        Some(format!("{WINDOW_TITLE} | {}", self.world.player().map))
    }
}
