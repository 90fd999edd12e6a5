use crate::routes::routes::AppRoutes;
use crate::system::auth::context::SessionProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <SessionProvider>
                <ErrorBoundary fallback=|_errors| view! {
                    <div class="error-boundary">
                        <h2>"Something went wrong"</h2>
                        <p>"This part of the page failed to load. Please refresh and try again."</p>
                    </div>
                }>
                    <AppRoutes />
                </ErrorBoundary>
            </SessionProvider>
        </ConfigProvider>
    }
}
