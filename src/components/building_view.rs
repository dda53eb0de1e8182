use yew::prelude::*;

use super::elevator_panel::ElevatorPanel;
use crate::model::{Floor, Passenger, Side};

#[derive(Properties, PartialEq, Clone)]
pub struct BuildingViewProps {
    pub floors: Floor,
    pub current_floor: Floor,
    pub waiting: Vec<Passenger>,
    pub riding: Vec<Passenger>,
    /// Game clock, used with `patience_ms` to shrink each waiting passenger's patience bar.
    pub now_ms: u64,
    pub patience_ms: u64,
}

#[function_component]
pub fn BuildingView(props: &BuildingViewProps) -> Html {
    let slot = |floor: Floor, side: Side| {
        let waiting = props
            .waiting
            .iter()
            .find(|p| p.origin == floor && p.side == side);
        let display = if waiting.is_some() { "flex" } else { "none" };
        let patience = waiting
            .map(|p| {
                let waited = props.now_ms.saturating_sub(p.spawned_at_ms) as f64;
                (1.0 - waited / props.patience_ms.max(1) as f64).clamp(0.0, 1.0)
            })
            .unwrap_or(0.0);
        let bar_color = if patience < 0.34 { "#f85149" } else { "#3fb950" };
        html! {
            <div style="width:40px; height:48px; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:3px;">
                <div
                    id={format!("passenger-{}-{}", floor, side.as_str())}
                    style={format!("display:{}; width:32px; height:32px; border-radius:50%; background:#d29922; color:#0e1116; font-weight:700; align-items:center; justify-content:center;", display)}
                >
                    { waiting.map(|p| p.destination.to_string()).unwrap_or_default() }
                </div>
                <div style={format!("width:{:.0}%; height:3px; background:{}; border-radius:2px;", patience * 100.0, bar_color)}></div>
            </div>
        }
    };

    // Top floor first
    html! {
        <div id="building" style="display:flex; flex-direction:column; border:2px solid #30363d; border-radius:8px; background:#161b22;">
            { for (1..=props.floors).rev().map(|floor| {
                let car = if floor == props.current_floor {
                    html! {
                        <div id="elevator" style="width:110px; height:52px; background:#58a6ff; border-radius:6px; display:flex; align-items:center; justify-content:center;">
                            <ElevatorPanel riding={props.riding.clone()} />
                        </div>
                    }
                } else {
                    html! {}
                };
                html! {
                    <div
                        id={format!("floor-{}", floor)}
                        class="floor"
                        style="display:flex; align-items:center; gap:8px; padding:6px 10px; border-bottom:1px solid #30363d; height:64px;"
                    >
                        <span style="width:28px; font-weight:600; opacity:0.8;">{ format!("{}F", floor) }</span>
                        { slot(floor, Side::Left) }
                        <div style="width:120px; height:56px; border-left:1px dashed #30363d; border-right:1px dashed #30363d; display:flex; align-items:center; justify-content:center;">
                            { car }
                        </div>
                        { slot(floor, Side::Right) }
                    </div>
                }
            }) }
        </div>
    }
}
