use anyhow::Context;

use folio_app::modules::{self, AppContext};
use folio_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load FOLIO settings")?;
    folio_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "folio-app bootstrap starting"
    );

    let ctx = AppContext::new(&settings);

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &ctx);

    let init_ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&init_ctx).await?;
    registry.start_all(&init_ctx).await?;

    let app = folio_http::build_router(&registry, &settings)
        .with_extension(ctx.auth.clone())
        .build();

    tracing::info!("folio-app bootstrap complete");

    folio_http::start_server(app, &settings).await?;

    registry.stop_all().await?;
    Ok(())
}
