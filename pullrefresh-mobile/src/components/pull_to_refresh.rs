//! Pull-to-refresh component for mobile

use std::future::Future;
use std::pin::Pin;

use pullrefresh_common::{PullConfig, PullView, RefreshOutcome, DEFAULT_THRESHOLD};
use tracing::error;
use web_sys::Element;
use yew::prelude::*;

use crate::driver::Driver;
use crate::listeners::ListenerSet;

/// Future returned by a refresh callback
pub type RefreshFuture = Pin<Box<dyn Future<Output = RefreshOutcome>>>;

#[derive(Properties, PartialEq)]
pub struct PullToRefreshProps {
    #[prop_or_default]
    pub children: Children,
    pub on_refresh: Callback<(), RefreshFuture>,
    #[prop_or(DEFAULT_THRESHOLD)]
    pub threshold: f64,
    /// Caller-driven loading; forces the refreshing display while true
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or(true)]
    pub enabled: bool,
}

#[function_component(PullToRefresh)]
pub fn pull_to_refresh(props: &PullToRefreshProps) -> Html {
    let container = use_node_ref();
    let view = {
        let threshold = props.threshold;
        let is_loading = props.is_loading;
        use_state_eq(move || PullView {
            threshold,
            is_refreshing: is_loading,
            ..Default::default()
        })
    };
    let driver = use_mut_ref(|| None::<Driver>);

    // Mount the gesture; a new threshold or enabled flag rebuilds it
    {
        let container = container.clone();
        let driver = driver.clone();
        let view = view.clone();
        let on_refresh = props.on_refresh.clone();
        let config = PullConfig {
            threshold: props.threshold,
            is_loading: props.is_loading,
            enabled: props.enabled,
            ..Default::default()
        };

        use_effect_with((props.threshold, props.enabled), move |_| {
            let listeners = container
                .cast::<Element>()
                .and_then(|element| mount(&element, config, on_refresh, view))
                .map(|(mounted, listeners)| {
                    *driver.borrow_mut() = Some(mounted);
                    listeners
                });

            move || {
                drop(listeners);
                let mounted = driver.borrow_mut().take();
                if let Some(mounted) = mounted {
                    mounted.teardown();
                }
            }
        });
    }

    {
        let driver = driver.clone();
        use_effect_with(props.is_loading, move |loading| {
            let mounted = driver.borrow().clone();
            if let Some(mounted) = mounted {
                mounted.set_loading(*loading);
            }
        });
    }

    {
        let driver = driver.clone();
        use_effect_with(props.on_refresh.clone(), move |on_refresh| {
            let mounted = driver.borrow().clone();
            if let Some(mounted) = mounted {
                mounted.set_on_refresh(on_refresh.clone());
            }
        });
    }

    let offset = view.pull_distance;
    // Follow the finger exactly while dragging, animate otherwise
    let transition = if view.is_dragging { "none" } else { "transform 0.2s" };
    let style = format!(
        "transform: translateY({}px); transition: {};",
        offset, transition
    );
    let opacity = if view.is_refreshing { 1.0 } else { view.progress() };

    html! {
        <div class="pull-to-refresh-container" ref={container}>
            {if view.is_visible() {
                html! {
                    <div
                        class={classes!(
                            "pull-indicator",
                            view.is_armed().then_some("armed"),
                            view.is_refreshing.then_some("refreshing")
                        )}
                        style={format!("opacity: {}", opacity)}
                    >
                        {view.label()}
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="pull-to-refresh-content" style={style}>
                {props.children.clone()}
            </div>
        </div>
    }
}

/// Build the driver for a mounted container and attach its listeners
fn mount(
    element: &Element,
    config: PullConfig,
    on_refresh: Callback<(), RefreshFuture>,
    view: UseStateHandle<PullView>,
) -> Option<(Driver, ListenerSet)> {
    let on_view = Callback::from(move |next: PullView| view.set(next));

    let driver = match Driver::new(element.clone(), config, on_refresh, on_view) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Pull-to-refresh disabled: {}", e);
            return None;
        }
    };

    match ListenerSet::attach(element, &driver) {
        Ok(listeners) => {
            driver.publish();
            Some((driver, listeners))
        }
        Err(e) => {
            error!("Failed to attach gesture listeners: {:?}", e);
            driver.teardown();
            None
        }
    }
}
