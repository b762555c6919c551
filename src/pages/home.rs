use leptos::prelude::*;

use crate::components::neural_network::{NetworkConfig, NeuralNetworkCanvas};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
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

			<section
				class="hero"
				style="position: relative; min-height: 100vh; overflow: hidden; background: #0b0a1a;"
			>
				<NeuralNetworkCanvas config=NetworkConfig::default() />
				<div class="hero-overlay" style="position: relative; padding: 20vh 8vw; color: white;">
					<h1>"Learn how machines learn"</h1>
					<p class="subtitle">"Signals ripple through a freshly wired network on every visit."</p>
				</div>
			</section>
		</ErrorBoundary>
	}
}
