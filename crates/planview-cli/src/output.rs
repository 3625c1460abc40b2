//! JSON envelopes for non-interactive commands.
//!
//! Successes go to stdout as `{"success":true,"api_version":..,"data":..}`,
//! failures to stderr as `{"success":false,"api_version":..,"error":..}`.

use serde::Serialize;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    api_version: &'static str,
    #[serde(flatten)]
    body: Body<'a, T>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Body<'a, T: Serialize> {
    Data(T),
    Error(&'a str),
}

#[derive(Serialize)]
struct Listing<T: Serialize> {
    count: usize,
    items: Vec<T>,
}

pub fn output_success<T: Serialize>(data: T) -> anyhow::Result<()> {
    let envelope = Envelope {
        success: true,
        api_version: API_VERSION,
        body: Body::Data(data),
    };
    println!("{}", serde_json::to_string(&envelope)?);
    Ok(())
}

pub fn output_list<T: Serialize>(items: Vec<T>) -> anyhow::Result<()> {
    output_success(Listing {
        count: items.len(),
        items,
    })
}

/// Print a failure envelope and exit with status 1.
pub fn output_error(message: &str) -> ! {
    let envelope: Envelope<'_, ()> = Envelope {
        success: false,
        api_version: API_VERSION,
        body: Body::Error(message),
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{message}"),
    }
    std::process::exit(1)
}
