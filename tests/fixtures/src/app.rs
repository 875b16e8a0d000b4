fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

fn secret_key() -> Option<std::ffi::OsString> {
    std::env::var_os("SECRET_KEY")
}

fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}

fn main() {
    let _ = (database_url(), secret_key(), port());
}
