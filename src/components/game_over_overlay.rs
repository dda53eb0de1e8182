use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub final_score: i64,
    pub best_score: Option<i64>,
    pub restart: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    let best_line = match props.best_score {
        Some(best) if best == props.final_score => {
            html! { <p style="margin:4px 0; color:#d4af37;">{"New best!"}</p> }
        }
        Some(best) => html! { <p style="margin:4px 0; opacity:0.8;">{ format!("Best: {}", best) }</p> },
        None => html! {},
    };
    html! {
        <div id="game-over" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:280px; display:flex; flex-direction:column; gap:4px;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p style="margin:4px 0;">{"Final Score: "}<span id="final-score">{ props.final_score }</span></p>
            { best_line }
            <div style="margin-top:16px; display:flex; justify-content:center;">
                <button id="restart-btn" onclick={restart_btn}>{"Play Again"}</button>
            </div>
        </div>
    }
}
