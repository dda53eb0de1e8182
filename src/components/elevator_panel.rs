use yew::prelude::*;

use crate::model::Passenger;

#[derive(Properties, PartialEq, Clone)]
pub struct ElevatorPanelProps {
    pub riding: Vec<Passenger>,
}

/// Riders inside the car, one marker per passenger in boarding order.
#[function_component]
pub fn ElevatorPanel(props: &ElevatorPanelProps) -> Html {
    html! {
        <div id="elevator-passengers" style="display:flex; flex-wrap:wrap; gap:2px; justify-content:center; max-width:104px;">
            { for props.riding.iter().map(|p| html! {
                <div
                    class="elevator-passenger"
                    title={format!("Destination: floor {}", p.destination)}
                    style="width:16px; height:16px; border-radius:50%; background:#0e1116; color:#e6edf3; font-size:10px; display:flex; align-items:center; justify-content:center;"
                >
                    { p.destination }
                </div>
            }) }
        </div>
    }
}
