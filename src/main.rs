mod catalog;
mod data;
mod lp;
mod scoring;
mod server;
mod solver;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    server::run_server().await;
}
