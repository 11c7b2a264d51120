//! Static registry of banks and the products we track for each.
//!
//! Definition order matters: the crawl visits banks and products in the order
//! listed here, which also fixes console log ordering and the key order in the
//! written snapshot. Product ids are the opaque identifiers each bank's CDR
//! product-reference API uses; they change rarely but are not guaranteed
//! stable, so a product that starts 404ing usually means the id rotated.

use crate::error::AppError;

/// One tracked product: display name plus the bank's opaque product id.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub name: &'static str,
    pub id: &'static str,
}

/// A bank's CDR endpoint and tracked products.
#[derive(Debug, Clone, Copy)]
pub struct BankConfig {
    pub key: &'static str,
    pub display_name: &'static str,
    pub base_url: &'static str,
    pub products: &'static [Product],
}

pub const BANKS: &[BankConfig] = &[
    BankConfig {
        key: "CBA",
        display_name: "Commonwealth Bank",
        base_url: "https://api.commbank.com.au/public/cds-au/v1",
        products: &[
            Product { name: "Digi Home Loan (OO)", id: "c1d7e8ef741e45e5b013fa7d05574e80" },
            Product { name: "Digi Home Loan (Inv)", id: "b071254b466a420ea2ae755d9fc02141" },
            Product { name: "Simple Home Loan (Inv)", id: "96b471de2e5e48328201abb352d0ed98" },
        ],
    },
    BankConfig {
        key: "Westpac",
        display_name: "Westpac",
        base_url: "https://digital-api.westpac.com.au/cds-au/v1",
        products: &[
            Product { name: "Flexi First (OO)", id: "HLVariableFlexiOwnerOccupied" },
            Product { name: "Flexi First (Inv)", id: "HLVariableFlexiInvestment" },
            Product { name: "Rocket Loan (OO)", id: "HLVariableOffsetOwnerOccupied" },
            Product { name: "Fixed Rate", id: "HLFixed" },
            // Commercial products
            Product { name: "Secured Business Loan", id: "SecuredBusinessLoan" },
            Product { name: "Business Overdraft", id: "BusinessOverdraft" },
            Product { name: "Unsecured Business Overdraft", id: "UnsecuredBusinessOverdraft" },
            Product { name: "Unsecured Business Loan", id: "UnsecuredBusinessLoan" },
            Product { name: "Bank Bill Business Loan", id: "BankBillBusinessLoan" },
        ],
    },
    BankConfig {
        key: "NAB",
        display_name: "National Australia Bank",
        base_url: "https://openbank.api.nab.com.au/cds-au/v1",
        products: &[
            Product { name: "Base Variable", id: "e34c524c-6323-468f-8e20-36130e256fd5" },
            Product { name: "Tailored", id: "65bcb7bd-e50c-4b65-b7d7-9d5abc089a5a" },
        ],
    },
    BankConfig {
        key: "ANZ",
        display_name: "ANZ",
        base_url: "https://api.anz/cds-au/v1",
        products: &[
            Product { name: "Standard Variable", id: "f71660e7-51a9-4029-b4d0-39d09489d7bc" },
            Product { name: "Simplicity PLUS", id: "544ad5cb-7e52-4a30-b1d7-a080abafbfac" },
            Product { name: "Fixed Rate", id: "3a86f9e4-1b41-4222-9091-5934d1fc9178" },
        ],
    },
    BankConfig {
        key: "Macquarie",
        display_name: "Macquarie Bank",
        base_url: "https://api.macquariebank.io/cds-au/v1",
        products: &[
            Product { name: "Basic Home Loan", id: "LN001MBLBAS001" },
            Product { name: "Offset Home Loan", id: "LN001MBLSTD001" },
        ],
    },
    BankConfig {
        key: "ING",
        display_name: "ING",
        base_url: "https://id.ob.ing.com.au/cds-au/v1",
        products: &[
            Product { name: "Mortgage Simplifier", id: "f53a58f1-a964-4d9f-aa9d-23fec9148451" },
            Product { name: "Orange Advantage", id: "9b408eec-e2ff-4c65-a19f-d72fbaa181f9" },
            Product { name: "Fixed Rate", id: "4bacdad3-d6f4-4c99-a50b-690a46bd9a23" },
        ],
    },
    BankConfig {
        key: "Bendigo",
        display_name: "Bendigo Bank",
        base_url: "https://api.cdr.bendigobank.com.au/cds-au/v1",
        products: &[
            Product { name: "Easy Home Loan", id: "2e082120-40d6-4587-8ca9-eaafd8201877" },
            Product { name: "Flex Home Loan", id: "7a5853d0-6ef4-4c90-9e22-1c091c0de69d" },
            Product { name: "Express Home Loan", id: "01fec5c4-a888-4330-a8cc-4a0a0ac931b5" },
        ],
    },
];

/// Resolve a `--bank` filter against the registry, preserving registry order.
///
/// An empty filter selects every bank. Keys match case-insensitively; an
/// unknown key is a configuration error, not a silent no-op.
pub fn select_banks(filter: &[String]) -> Result<Vec<&'static BankConfig>, AppError> {
    if filter.is_empty() {
        return Ok(BANKS.iter().collect());
    }

    for wanted in filter {
        if !BANKS.iter().any(|b| b.key.eq_ignore_ascii_case(wanted)) {
            let known: Vec<&str> = BANKS.iter().map(|b| b.key).collect();
            return Err(AppError::new(format!(
                "Unknown bank key '{wanted}' (known: {})",
                known.join(", ")
            )));
        }
    }

    Ok(BANKS
        .iter()
        .filter(|b| filter.iter().any(|w| b.key.eq_ignore_ascii_case(w)))
        .collect())
}
