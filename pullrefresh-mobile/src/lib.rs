//! Pullrefresh Mobile UI
//!
//! Browser host for the pull-to-refresh gesture built with Yew.
//! Wires touch, mouse and wheel listeners on a container to the
//! gesture core in `pullrefresh-common` and renders its view.

mod components;
mod driver;
mod input;
mod listeners;

pub mod dom;
pub mod logging;

use gloo_timers::future::TimeoutFuture;
use pullrefresh_common::RefreshOutcome;
use yew::prelude::*;

pub use components::{PullToRefresh, PullToRefreshProps, RefreshFuture};
pub use logging::LoggingConfig;

/// Demo feed: pulling prepends a new entry after a simulated fetch
#[function_component(App)]
pub fn app() -> Html {
    let items = use_state(|| (1..=20).rev().collect::<Vec<u32>>());

    let on_refresh = {
        let items = items.clone();

        Callback::from(move |_: ()| -> RefreshFuture {
            let items = items.clone();
            Box::pin(async move {
                TimeoutFuture::new(1_000).await;
                let next = items.first().copied().unwrap_or(0) + 1;
                let mut fresh = vec![next];
                fresh.extend(items.iter().copied());
                items.set(fresh);
                RefreshOutcome::Ok(())
            })
        })
    };

    html! {
        <div class="mobile-app">
            <PullToRefresh on_refresh={on_refresh}>
                <ul class="feed">
                    {for items.iter().map(|item| html! {
                        <li key={*item} class="feed-item">{format!("Item {}", item)}</li>
                    })}
                </ul>
            </PullToRefresh>
        </div>
    }
}

/// Entry point for WASM
#[cfg(target_arch = "wasm32")]
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(e) = LoggingConfig::init_default() {
        web_sys::console::warn_1(&format!("Logging disabled: {}", e).into());
    }
    yew::Renderer::<App>::new().render();
}
