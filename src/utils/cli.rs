use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Catalog listening host
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub(crate) host: String,

    /// Catalog listening port
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub(crate) port: u16,

    /// Media storage backend type
    #[arg(short, long, env = "MEDIA_STORAGE", default_value = "S3")]
    pub(crate) storage: String,

    /// Object storage bucket holding asset media
    #[arg(long, env = "CELLAR_BUCKET", default_value = "pam-medias")]
    pub(crate) bucket: String,

    /// Object storage endpoint host
    #[arg(long, env = "CELLAR_ADDON_HOST", default_value = "")]
    pub(crate) s3_host: String,

    /// Object storage access key id
    #[arg(long, env = "CELLAR_ADDON_KEY_ID", default_value = "")]
    pub(crate) s3_key: String,

    /// Object storage secret key
    #[arg(long, env = "CELLAR_ADDON_KEY_SECRET", default_value = "")]
    pub(crate) s3_secret: String,

    /// Lifetime of presigned media download urls, in seconds
    #[arg(long, env = "MEDIA_URL_TTL_SECONDS", default_value_t = 3600)]
    pub(crate) presign_ttl_secs: u64,

    /// Database host
    #[arg(long, env = "POSTGRES_HOST", default_value = "localhost")]
    pub(crate) db_host: String,

    /// Database port
    #[arg(long, env = "POSTGRES_PORT", default_value_t = 5432)]
    pub(crate) db_port: u16,

    /// Database user
    #[arg(long, env = "POSTGRES_USER", default_value = "postgres")]
    pub(crate) db_user: String,

    /// Database password
    #[arg(long, env = "POSTGRES_PASSWORD", default_value = "postgres")]
    pub(crate) db_password: String,

    /// Database name
    #[arg(long, env = "POSTGRES_DB", default_value = "postgres")]
    pub(crate) db_name: String,
}
