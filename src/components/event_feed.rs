use yew::prelude::*;

use crate::model::GameEvent;
use crate::util::describe_event;

#[derive(Properties, PartialEq, Clone)]
pub struct EventFeedProps {
    pub events: Vec<GameEvent>,
}

#[function_component]
pub fn EventFeed(props: &EventFeedProps) -> Html {
    let color = |event: &GameEvent| match event {
        GameEvent::DroppedOff { .. } => "#3fb950",
        GameEvent::TimedOut { .. } => "#f85149",
        GameEvent::GameOver { .. } => "#d4af37",
        GameEvent::PickedUp { .. } => "#8b949e",
    };
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 10px; font-size:12px; line-height:1.5; min-height:140px;">
            { for props.events.iter().rev().map(|e| html! {
                <div style={format!("color:{};", color(e))}>{ describe_event(e) }</div>
            }) }
        </div>
    }
}
