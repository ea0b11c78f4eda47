use crate::terminal::colors;
use colored::*;
use rekon_common::asset::{Endpoint, Subdomain};
use rekon_common::url::explicit_scheme;
use rekon_protocols::scheme::Scheme;

pub type Detail = (String, ColoredString);

pub fn url_to_detail(url: &str) -> Detail {
    let scheme: Option<Scheme> = explicit_scheme(url).and_then(|scheme| scheme.parse().ok());
    let (key, color): (&str, Color) = match scheme {
        Some(Scheme::Https) => ("HTTPS", colors::HTTPS),
        Some(Scheme::Http) => ("HTTP", colors::HTTP),
        Some(Scheme::Ftp) => ("FTP", colors::FTP),
        None => ("URL", colors::TEXT_DEFAULT),
    };
    (key.to_string(), url.color(color))
}

pub fn status_to_detail(status: Option<u16>) -> Option<Detail> {
    let status: u16 = status?;
    let color: Color = match status {
        200..=299 => colors::ADDED,
        300..=399 => colors::ACCENT,
        _ => colors::REMOVED,
    };
    Some(("Status".to_string(), status.to_string().color(color)))
}

fn title_to_detail(title: Option<&str>) -> Option<Detail> {
    title
        .filter(|t| !t.trim().is_empty())
        .map(|t| ("Title".to_string(), t.trim().italic()))
}

pub fn subdomain_details(subdomain: &Subdomain) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "Scan".to_string(),
        subdomain.scan.0.to_string().color(colors::ACCENT),
    )];
    details.extend(title_to_detail(subdomain.page_title.as_deref()));
    details.extend(status_to_detail(subdomain.http_status));
    details
}

pub fn endpoint_details(endpoint: &Endpoint) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![url_to_detail(&endpoint.http_url)];
    details.extend(title_to_detail(endpoint.page_title.as_deref()));
    details.extend(status_to_detail(endpoint.http_status));
    let alive: ColoredString = match endpoint.is_alive {
        true => "yes".color(colors::ADDED),
        false => "no".color(colors::REMOVED),
    };
    details.push(("Alive".to_string(), alive));
    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
