#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_typ: String,
    pub bucket: String,
    pub s3_host: String,
    pub s3_key: String,
    pub s3_secret: String,
    pub presign_ttl_secs: u64,
    pub db_url: String,
    pub create_token: String,
    pub delete_token: String,
}
