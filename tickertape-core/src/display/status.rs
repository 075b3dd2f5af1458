//! Status bar contents

use core::fmt::Write;
use core::net::Ipv4Addr;

use heapless::String;

/// Longest status line ("IP:255.255.255.255 E255/API")
pub const STATUS_LINE_LEN: usize = 32;

/// Everything shown on the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBar {
    /// Interface address, shown only while the link is up
    pub address: Option<Ipv4Addr>,
    /// Link up
    pub link_up: bool,
    /// Status code of the last join attempt
    pub link_code: u8,
    /// Last quote fetch succeeded
    pub data_ok: bool,
}

impl StatusBar {
    /// Render as `IP:<address> <W|E<code>>/<D|API>`
    pub fn render(&self) -> String<STATUS_LINE_LEN> {
        let mut line = String::new();
        let address = match self.address {
            Some(addr) if self.link_up => addr,
            _ => Ipv4Addr::UNSPECIFIED,
        };

        // Cannot overflow: the longest line fits STATUS_LINE_LEN
        let _ = write!(line, "IP:{} ", address);
        if self.link_up {
            let _ = line.push('W');
        } else {
            let _ = write!(line, "E{}", self.link_code);
        }
        let _ = line.push_str(if self.data_ok { "/D" } else { "/API" });
        line
    }
}
