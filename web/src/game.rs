use crate::schedule::IntervalScheduler;
use crate::utils::*;
use clap::Args;
use colortap_core as game;
use game::{Color, GameConfig, GameEvent, Snapshot};
use gloo::timers::callback::Timeout;
use std::time::Duration;
use yew::prelude::*;

/// How long the grid stays highlighted after a correct tap.
const FLASH_MILLIS: u32 = 200;

type Loop = game::GameLoop<IntervalScheduler, game::RandomRoundGenerator>;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Countdown length in ticks
    #[arg(short, long)]
    pub duration: Option<game::Count>,

    /// Milliseconds between ticks
    #[arg(long)]
    pub tick_ms: Option<u64>,
}

impl GameProps {
    fn config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig::new(
            defaults.cells,
            self.duration.unwrap_or(defaults.duration),
            self.tick_ms
                .map_or(defaults.tick_period, Duration::from_millis),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Refresh(GameEvent, Snapshot),
    Tap(usize),
    Restart,
    FlashDone,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: usize,
    color: Color,
    callback: Callback<usize>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        color,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tap {} ({})", index, color);
        callback.emit(index);
    });

    html! {
        <button class="cell" style={swatch_style(color)} aria-label={color.name()} {onclick}/>
    }
}

pub(crate) struct GameView {
    game: Loop,
    snapshot: Snapshot,
    flash: Option<Timeout>,
}

impl GameView {
    fn create_loop(ctx: &Context<Self>) -> Loop {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let link = ctx.link().clone();
        game::GameLoop::new(
            props.config(),
            game::RandomRoundGenerator::new(seed),
            IntervalScheduler,
            move |event, snapshot: &Snapshot| {
                link.send_message(Msg::Refresh(event, snapshot.clone()))
            },
        )
    }

    fn start_flash(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self.flash = Some(Timeout::new(FLASH_MILLIS, move || {
            link.send_message(Msg::FlashDone)
        }));
    }

    fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut game = Self::create_loop(ctx);
        game.start();
        let snapshot = game.snapshot();
        Self {
            game,
            snapshot,
            flash: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Refresh(event, snapshot) => {
                log::trace!("{:?}: round {}", event, snapshot.round_number);
                match event {
                    GameEvent::CorrectTap => self.start_flash(ctx),
                    GameEvent::GameOver => log::info!("game over, score {}", snapshot.score),
                    _ => {}
                }
                let updated = self.snapshot != snapshot || event == GameEvent::CorrectTap;
                self.snapshot = snapshot;
                updated
            }
            Tap(index) => {
                let outcome = self.game.tap(index);
                log::debug!("tap {}: {:?}", index, outcome);
                false
            }
            Restart => {
                self.game.restart();
                false
            }
            FlashDone => self.flash.take().is_some(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Snapshot {
            target,
            cells,
            score,
            high_score,
            time_left,
            game_over,
            ..
        } = &self.snapshot;

        let cb_tap = ctx.link().callback(Msg::Tap);
        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Restart
        });
        let grid_class = classes!("grid", self.is_flashing().then_some("flash"));

        html! {
            <div class="colortap">
                <h1>{"Color Tap Challenge"}</h1>
                <p class="score">{format!("Score: {}", score)}</p>
                <p class="high-score">{format!("High Score: {}", high_score)}</p>
                <p class="timer">{format_countdown(*time_left)}</p>
                <p class="instructions">{"Tap the square of this color:"}</p>
                <div class="target" style={swatch_style(*target)} title={target.name()}/>
                <div class={grid_class}>
                    {
                        for cells.iter().enumerate().map(|(index, &color)| html! {
                            <CellView {index} {color} callback={cb_tap.clone()}/>
                        })
                    }
                </div>
                if *game_over {
                    <div class="game-over">
                        <h2>{"Game Over!"}</h2>
                        <button class="restart" onclick={cb_restart}>{"Restart Game"}</button>
                    </div>
                }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.game.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(duration: Option<game::Count>, tick_ms: Option<u64>) -> GameProps {
        GameProps {
            seed: None,
            duration,
            tick_ms,
        }
    }

    #[test]
    fn props_default_to_classic_config() {
        assert_eq!(props(None, None).config(), GameConfig::default());
    }

    #[test]
    fn props_override_duration_and_period() {
        let config = props(Some(10), Some(500)).config();

        assert_eq!(config.cells, 9);
        assert_eq!(config.duration, 10);
        assert_eq!(config.tick_period, Duration::from_millis(500));
    }

    #[test]
    fn zero_overrides_are_clamped() {
        let config = props(Some(0), Some(0)).config();

        assert_eq!(config.duration, 1);
        assert_eq!(config.tick_period, Duration::from_millis(1));
    }
}
