use std::env;

/// Which document store backs the dashboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentBackend {
    Postgres,
    Memory,
}

impl DocumentBackend {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Self::Memory,
            _ => Self::Postgres,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub document_backend: DocumentBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let document_backend = env::var("DOCUMENT_BACKEND")
            .map(|v| DocumentBackend::parse(&v))
            .unwrap_or(DocumentBackend::Postgres);

        // The in-memory backend runs without a database.
        let database_url = match document_backend {
            DocumentBackend::Postgres => Some(env::var("DATABASE_URL")?),
            DocumentBackend::Memory => env::var("DATABASE_URL").ok(),
        };

        Ok(Self {
            document_backend,
            database_url,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            jwt_secret: env::var("JWT_SECRET")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://localhost:5173".to_string()),
        })
    }
}
