use crate::print::TablePrint;
use colored::Colorize;
use source_ip::PrivateRangeSet;
use std::net::IpAddr;

#[derive(Debug, PartialEq, Eq)]
enum Status {
    Public,
    Private,
    Invalid,
}

pub fn handle(ranges: &PrivateRangeSet, addresses: &[String]) {
    let mut table = TablePrint::new_with_headers(vec!["Address", "Canonical", "Status"]);

    for address in addresses {
        let (canonical, status) = classify(ranges, address);
        let status = match status {
            Status::Public => "public".green(),
            Status::Private => "private".yellow(),
            Status::Invalid => "invalid".red(),
        };
        table.add_row(vec![
            address.clone(),
            canonical.unwrap_or_else(|| "-".to_string()),
            status.to_string(),
        ]);
    }

    table.print();
}

fn classify(ranges: &PrivateRangeSet, address: &str) -> (Option<String>, Status) {
    match address.trim().parse::<IpAddr>() {
        Ok(ip) => {
            let status = if ranges.is_private(ip) {
                Status::Private
            } else {
                Status::Public
            };
            (Some(ip.to_canonical().to_string()), status)
        }
        Err(_) => (None, Status::Invalid),
    }
}
