pub const DEFAULT_LOG_DIRECTIVE: &str = "thmbnl_server=info";

pub const DEFAULT_CLIENT_IP: &str = "127.0.0.1";
