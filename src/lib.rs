use worker::*;

mod config;
mod error;
mod feed;
mod handlers;
mod utils;

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    // Preflight never touches config or the feed
    if req.method() == Method::Options {
        return utils::cors::preflight();
    }

    console_log!("[offer] {:?} {}", req.method(), req.path());

    handlers::offer::handle(&req, &env).await
}
