// Host files read alongside the metrics provider: thermal zone, identity file.

use crate::array::ini::parse_pair;
use crate::array::probe::PathProber;

const THERMAL_ZONE: &str = "sys/class/thermal/thermal_zone0/temp";

/// Vendor identity file; `NAME=` carries the server name.
const IDENTITY_FILE: &str = "boot/config/ident.cfg";

/// CPU temperature in Celsius from the first thermal zone (millidegrees).
pub(crate) fn read_cpu_temp(prober: &PathProber) -> Option<f64> {
    let path = prober.probe(THERMAL_ZONE)?;
    let raw = std::fs::read_to_string(path).ok()?;
    parse_millidegrees(&raw)
}

fn parse_millidegrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().map(|m| m / 1000.0)
}

pub(crate) fn read_identity_name(prober: &PathProber) -> Option<String> {
    let path = prober.probe(IDENTITY_FILE)?;
    let content = std::fs::read_to_string(path).ok()?;
    parse_identity_name(&content)
}

fn parse_identity_name(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| parse_pair(line.trim()))
        .find(|(key, _)| key == "NAME")
        .map(|(_, value)| value)
        .filter(|v| !v.is_empty())
}
