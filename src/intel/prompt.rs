//! Instruction text sent with every lookup.

use super::schema::{CONTACT_FIELDS, GEOGRAPHY_FIELDS, NETWORK_INFO_FIELDS};

/// Registries the model is pointed at when searching.
pub const REGISTRIES: &[&str] = &["RIPE", "ARIN", "APNIC", "LACNIC", "AFRINIC"];

/// Builds the natural-language instruction for one address.
///
/// The section field lists come from the same constants as the response
/// schema.
pub fn build_lookup_prompt(ip: &str) -> String {
    format!(
        "Perform a professional WHOIS intelligence lookup for the IP address: {ip}.\n\
         Use Google Search to find real-time registry information from {registries}, or other relevant RIRs.\n\
         \n\
         Return the data in a structured JSON format with the following fields:\n\
         - summary: A 2-sentence explanation of what this IP is and who owns it.\n\
         - networkInfo: {{ {network} }}\n\
         - geography: {{ {geography} }}\n\
         - contacts: {{ {contacts} }}\n\
         \n\
         Ensure the response is a valid JSON object.",
        registries = REGISTRIES.join(", "),
        network = NETWORK_INFO_FIELDS.join(", "),
        geography = GEOGRAPHY_FIELDS.join(", "),
        contacts = CONTACT_FIELDS.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_address_and_sections() {
        let prompt = build_lookup_prompt("23.90.66.53");
        assert!(prompt.contains("IP address: 23.90.66.53."));
        assert!(prompt.contains("Google Search"));
        assert!(prompt.contains("networkInfo: { name, organization, netRange, cidr, status, registry }"));
        assert!(prompt.contains("geography: { country, city, coordinates }"));
        assert!(prompt.contains("contacts: { abuse, admin }"));
        assert!(prompt.contains("valid JSON object"));
    }

    #[test]
    fn test_prompt_keeps_address_verbatim() {
        let ip = "2001:4860:4860:0000:0000:0000:0000:8888";
        assert!(build_lookup_prompt(ip).contains(ip));
    }
}
