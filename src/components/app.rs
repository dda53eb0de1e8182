use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::{
    building_view::BuildingView, controls_panel::ControlsPanel, event_feed::EventFeed,
    game_over_overlay::GameOverOverlay, stats_panel::StatsPanel,
};
use crate::config::AppConfig;
use crate::model::{GameAction, GamePhase, GameSession};
use crate::util;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let session = {
        let game = props.config.game.clone();
        use_reducer(move || GameSession::new(game, ChaCha8Rng::from_entropy()))
    };
    let best_score = use_state(util::load_best_score);

    // Start the first game, then drive the clock and keyboard until unmount.
    {
        let session = session.clone();
        let tick_ms = props.config.game.tick_interval_ms;
        use_effect_with((), move |_| {
            session.dispatch(GameAction::Start);
            let window = web_sys::window().expect("no global `window` exists");

            let tick = {
                let session = session.clone();
                let last_tick = Rc::new(RefCell::new(js_sys::Date::now()));
                Closure::wrap(Box::new(move || {
                    let now = js_sys::Date::now();
                    let mut last = last_tick.borrow_mut();
                    let elapsed_ms = (now - *last).max(0.0) as u64;
                    *last = now;
                    session.dispatch(GameAction::Advance { elapsed_ms });
                }) as Box<dyn FnMut()>)
            };
            let tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    tick_ms as i32,
                )
                .ok();

            let keydown_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    let action = match e.key().to_lowercase().as_str() {
                        "w" | "arrowup" => GameAction::MoveUp,
                        "s" | "arrowdown" => GameAction::MoveDown,
                        _ => return,
                    };
                    e.prevent_default();
                    session.dispatch(action);
                }) as Box<dyn FnMut(_)>)
            };
            let _ = window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());

            move || {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = tick_id {
                    window.clear_interval_with_handle(id);
                }
                let _keep_alive = (&tick, &keydown_cb);
            }
        });
    }

    // Persist a new best when a game ends
    {
        let best_score = best_score.clone();
        let score = session.score;
        use_effect_with(session.phase, move |phase| {
            if *phase == GamePhase::Ended && (*best_score).map_or(true, |best| score > best) {
                util::save_best_score(score);
                best_score.set(Some(score));
            }
            || ()
        });
    }

    let on_up = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(GameAction::MoveUp))
    };
    let on_down = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(GameAction::MoveDown))
    };
    let on_restart = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(GameAction::Restart))
    };

    let running = session.is_running();
    let events: Vec<_> = session.events.iter().cloned().collect();

    html! {
        <div id="game" style="position:relative; min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif; display:flex; flex-direction:column; align-items:center; gap:16px; padding:16px; box-sizing:border-box;">
            <h1 style="margin:0; font-size:24px; color:#58a6ff;">{"Elevator Rush"}</h1>
            <StatsPanel score={session.score} time_left={session.time_left} best_score={*best_score} />
            <div style="display:flex; gap:16px; align-items:flex-start;">
                <BuildingView
                    floors={session.config.floors}
                    current_floor={session.current_floor}
                    waiting={session.waiting.clone()}
                    riding={session.riding.clone()}
                    now_ms={session.now_ms()}
                    patience_ms={session.config.passenger_timeout_ms}
                />
                <div style="display:flex; flex-direction:column; gap:12px; min-width:220px;">
                    <ControlsPanel {running} on_up={on_up} on_down={on_down} />
                    <EventFeed {events} />
                </div>
            </div>
            <GameOverOverlay
                show={session.phase == GamePhase::Ended}
                final_score={session.score}
                best_score={*best_score}
                restart={on_restart}
            />
        </div>
    }
}
