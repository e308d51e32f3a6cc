use std::{net::SocketAddr, sync::Arc};

use tokio::{net::TcpListener, sync::Notify, task::JoinSet};

use crate::{http::{http_server::{HttpServer, HttpServerHandle}, http_server_config::HttpServerConfig}, storage::{health_checks_db::HealthChecksDb, storage_options::StorageOptions, storage_registration::StorageRegistration}, ui::{ui_api, ui_collector::HealthCheckCollector, ui_settings::UiSettings}};

type ConfigureCallback = Box<dyn FnOnce(&mut StorageOptions) + Send>;

/// Reporting UI backend: storage, collector and the executions API.
pub struct HealthChecksUi {
    settings: UiSettings,
    configure: Option<ConfigureCallback>,
}

impl HealthChecksUi {
    pub fn new(settings: UiSettings) -> Self {
        HealthChecksUi {
            settings,
            configure: None,
        }
    }

    /// **Optional**
    ///
    /// Customizes the storage pool options, see `StorageRegistration::configure`.
    pub fn storage_options(mut self, configure: impl FnOnce(&mut StorageOptions) + Send + 'static) -> Self {
        self.configure = Some(Box::new(configure));
        self
    }

    /// Registers and migrates storage, stores endpoints from the settings that are not yet known,
    /// then starts the collector and the API server.
    pub async fn start(self) -> anyhow::Result<HealthChecksUiHost> {
        let settings = self.settings;
        let mut registration = StorageRegistration::new(settings.storage.provider, settings.storage.connection_string.clone());
        if let Some(configure) = self.configure {
            registration = registration.configure(configure);
        }

        let db = registration.register()?;
        db.migrate().await?;
        Self::seed_configurations(&db, &settings).await?;

        let config = HttpServerConfig::new(settings.ip.clone(), settings.port);
        let listener = TcpListener::bind(config.host()).await?;
        let address = listener.local_addr()?;
        let server = ui_api::executions_route(HttpServer::new(config), &settings.api_path, db.clone())?;
        let server_handle = server.handle();

        let collector_shutdown = Arc::new(Notify::new());
        let collector = HealthCheckCollector::new(db.clone(), settings.evaluation_interval());

        let mut tasks = JoinSet::new();
        tasks.spawn(collector.run(collector_shutdown.clone()));
        tasks.spawn(async move {
            if let Err(err) = server.receive_on(listener).await {
                tracing::error!("health checks ui server failed: {:?}", err);
            }
        });

        tracing::info!("health checks ui listening on {}{}", address, settings.api_path);
        Ok(HealthChecksUiHost {
            address,
            db,
            server_handle,
            collector_shutdown,
            tasks,
        })
    }

    async fn seed_configurations(db: &HealthChecksDb, settings: &UiSettings) -> anyhow::Result<()> {
        let existing = db.configurations().await?;
        for endpoint in &settings.endpoints {
            if existing.iter().any(|configuration| configuration.name == endpoint.name) {
                continue;
            }
            db.add_configuration(&endpoint.name, &endpoint.uri).await?;
            tracing::debug!("added endpoint {} ({})", endpoint.name, endpoint.uri);
        }
        Ok(())
    }
}

/// A running `HealthChecksUi`.
pub struct HealthChecksUiHost {
    address: SocketAddr,
    db: HealthChecksDb,
    server_handle: HttpServerHandle,
    collector_shutdown: Arc<Notify>,
    tasks: JoinSet<()>,
}

impl HealthChecksUiHost {
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn db(&self) -> &HealthChecksDb {
        &self.db
    }

    /// Stops the collector and the server and waits for both to finish.
    pub async fn shutdown(mut self) {
        self.collector_shutdown.notify_one();
        self.server_handle.shutdown();
        while self.tasks.join_next().await.is_some() {}
        self.db.close().await;
    }
}
