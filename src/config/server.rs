use std::net::SocketAddr;
use std::path::PathBuf;

const USERS_FILE: &str = "users.json";
const CHIRPS_FILE: &str = "chirps.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the user and chirp documents.
    pub data_dir: PathBuf,
    /// Directory served under `/app`.
    pub file_root: PathBuf,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    #[must_use]
    pub fn chirps_path(&self) -> PathBuf {
        self.data_dir.join(CHIRPS_FILE)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            file_root: PathBuf::from("."),
        }
    }
}
