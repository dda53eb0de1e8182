use yew::prelude::*;

use crate::util::format_time;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub score: i64,
    pub time_left: u32,
    pub best_score: Option<i64>,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "font-weight:500; opacity:0.8;";
    let value_style = "min-width:48px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let time_color = if props.time_left <= 10 { "#f85149" } else { "#e6edf3" };
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; display:flex; gap:24px; font-size:16px;">
            <div style={row_style}>
                <span style={label_style}>{"Score"}</span>
                <span id="score" style={format!("{} color:#d4af37;", value_style)}>{ props.score }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Time"}</span>
                <span id="timer" style={format!("{} color:{};", value_style, time_color)}>{ format_time(props.time_left) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Best"}</span>
                <span id="best-score" style={format!("{} color:#58a6ff;", value_style)}>
                    { props.best_score.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()) }
                </span>
            </div>
        </div>
    }
}
