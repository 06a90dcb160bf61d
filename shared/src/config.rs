use anyhow::Result;
use constant_time_eq::constant_time_eq;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub accounts: AccountsConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse::<u64>()?,
            client_id: var_or("OAUTH_CLIENT_ID", "myApp"),
            client_secret: var_or("OAUTH_CLIENT_SECRET", "pass"),
        };
        let accounts = AccountsConfig {
            admin_username: var_or("APP_ADMIN_USERNAME", "admin@email.com"),
            admin_password: var_or("APP_ADMIN_PASSWORD", "admin"),
            user_username: var_or("APP_USER_USERNAME", "user@email.com"),
            user_password: var_or("APP_USER_PASSWORD", "user"),
        };
        Ok(Self {
            database,
            redis,
            auth,
            accounts,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

/// パスワードグラントで使うクライアント情報とアクセストークンの有効期限（秒）
#[derive(Clone)]
pub struct AuthConfig {
    pub ttl: u64,
    pub client_id: String,
    pub client_secret: String,
}

impl AuthConfig {
    pub fn is_valid_client(&self, client_id: &str, client_secret: &str) -> bool {
        // シークレットは比較にかかる時間から推測されないようにする
        let secret_matches =
            constant_time_eq(self.client_secret.as_bytes(), client_secret.as_bytes());
        self.client_id == client_id && secret_matches
    }
}

// 起動時に登録しておくアカウント
pub struct AccountsConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub user_username: String,
    pub user_password: String,
}
