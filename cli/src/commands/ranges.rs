use crate::print::TablePrint;
use serde::Serialize;
use source_ip::{IpNetwork, PrivateRangeSet};

#[derive(Serialize, Debug, PartialEq, Eq)]
struct RangeEntry {
    network: String,
    family: &'static str,
    prefix: u8,
}

impl From<&IpNetwork> for RangeEntry {
    fn from(range: &IpNetwork) -> Self {
        Self {
            network: range.to_string(),
            family: if range.is_ipv4() { "ipv4" } else { "ipv6" },
            prefix: range.prefix(),
        }
    }
}

pub fn handle(ranges: &PrivateRangeSet, json: bool) -> anyhow::Result<()> {
    let entries: Vec<RangeEntry> = ranges.iter().map(RangeEntry::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = TablePrint::new_with_headers(vec!["Network", "Family", "Prefix"]);
    for entry in entries {
        table.add_row(vec![
            entry.network,
            entry.family.to_string(),
            entry.prefix.to_string(),
        ]);
    }
    table.print();
    Ok(())
}
