use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub running: bool,
    pub on_up: Callback<()>,
    pub on_down: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let up_cb = {
        let cb = props.on_up.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let down_cb = {
        let cb = props.on_down.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-direction:column; gap:6px;">
        <button id="up-btn" onclick={up_cb} disabled={!props.running}>{"▲ Up"}</button>
        <button id="down-btn" onclick={down_cb} disabled={!props.running}>{"▼ Down"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Keys: W / ↑ up, S / ↓ down"}</div>
        <div style="font-size:11px; opacity:0.7;">{"Riders sharing a stop cost 1 point each at drop-off."}</div>
    </div>}
}
