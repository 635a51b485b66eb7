use leptos::prelude::*;

use crate::components::layered_network::{LayeredNetworkCanvas, default_layers};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (active, set_active) = signal(true);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="network-card">
				<div class="network-header">
					<h1>"Network Activity"</h1>
					<button on:click=move |_| set_active.update(|a| *a = !*a)>
						{move || if active.get() { "Pause" } else { "Resume" }}
					</button>
				</div>
				<div class="network-container">
					<LayeredNetworkCanvas active=active layers=default_layers() />
				</div>
			</div>
		</ErrorBoundary>
	}
}
