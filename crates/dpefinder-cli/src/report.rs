//! Plain-text report of designees ranked by distance.

use std::io::{self, Write};

use dpefinder_core::geo::RankedEntry;
use dpefinder_core::models::RecordSet;
use dpefinder_core::utils::format_phone;

/// Write the ranked listing. `limit` caps the number of entries shown.
pub fn render<W: Write>(
    out: &mut W,
    origin_zip: &str,
    records: &RecordSet,
    ranked: &[RankedEntry],
    limit: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "=== DPEs ranked by distance to {} ===", origin_zip)?;
    writeln!(out)?;

    let shown = limit.unwrap_or(ranked.len());
    for entry in ranked.iter().take(shown) {
        let Some(designee) = records.get(&entry.key) else {
            continue;
        };

        writeln!(out, "{:.1} sm", entry.miles)?;
        writeln!(out, "Designee Name: {}", designee.full_name)?;
        writeln!(out, "Designee City: {}", designee.address.city_state())?;
        writeln!(out, "Designee Phone Number: {}", format_phone(&designee.phone_number))?;
        if let Some(phone) = designee.secondary_phone() {
            writeln!(out, "Designee Address Phone Number: {}", format_phone(phone))?;
        }
        writeln!(out, "Designee Email: {}", designee.email)?;
        writeln!(out, "Designee Function Codes: {}", designee.function_codes)?;
        writeln!(out)?;
    }

    Ok(())
}
