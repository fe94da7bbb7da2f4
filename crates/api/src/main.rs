use std::sync::Arc;

use inkpress_auth::User;

#[tokio::main]
async fn main() {
    inkpress_observability::init();

    let admin_username = std::env::var("BLOG_ADMIN_USERNAME").unwrap_or_else(|_| {
        tracing::warn!("BLOG_ADMIN_USERNAME not set; using dev default");
        "admin".to_string()
    });
    let admin_password = std::env::var("BLOG_ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("BLOG_ADMIN_PASSWORD not set; using insecure dev default");
        "whatever".to_string()
    });

    let services = Arc::new(inkpress_api::app::services::build_services());

    // Users are created during environment setup; there is no registration
    // endpoint. Every write request authenticates against this record.
    let admin = User::create(&admin_username, &admin_password, "Site", "Admin")
        .expect("failed to hash bootstrap password");
    services
        .create_user(admin)
        .expect("failed to store bootstrap user");

    let app = inkpress_api::app::build_app(services);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
