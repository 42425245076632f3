// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for registries composed from descriptor constants.

use error_manager::{
    ErrorAttributes, ErrorDescriptor, InheritedRegistry, ManagerError, error_attributes,
    inherited_errors,
};

error_attributes! {
    /// Errors of the billing module.
    pub struct BillingErrors {
        CARD_DECLINED = ("BILL_001", "Card declined");
        CARD_EXPIRED = ("BILL_002", "Card expired");
    }
}

error_attributes! {
    pub struct ShippingErrors {
        ADDRESS_UNKNOWN = ("SHIP_001", "Address unknown");
    }
}

error_attributes! {
    pub struct AuditErrors {
        TRAIL_GAP = ("AUD_001", "Audit trail has a gap");
    }
}

inherited_errors! {
    /// Errors visible to the storefront.
    pub struct StoreErrors: BillingErrors, ShippingErrors;
}

inherited_errors! {
    pub struct BackofficeErrors: StoreErrors, AuditErrors;
}

inherited_errors! {
    pub struct LazyErrors: BillingErrors;
}

#[test]
fn lookup_covers_every_source() {
    assert_eq!(
        StoreErrors::error_description("BILL_002").unwrap(),
        "Card expired"
    );
    assert_eq!(
        StoreErrors::error_description("SHIP_001").unwrap(),
        "Address unknown"
    );
}

#[test]
fn combined_types_nest() {
    assert_eq!(
        BackofficeErrors::error_description("BILL_001").unwrap(),
        "Card declined"
    );
    assert_eq!(
        BackofficeErrors::error_description("AUD_001").unwrap(),
        "Audit trail has a gap"
    );
    assert!(StoreErrors::error_description("AUD_001").is_err());
}

#[test]
fn cache_fills_on_first_miss() {
    LazyErrors::reset_cache();
    assert_eq!(LazyErrors::cached_len(), 0);
    assert_eq!(
        LazyErrors::error_description("BILL_001").unwrap(),
        "Card declined"
    );
    assert_eq!(LazyErrors::cached_len(), 2);
}

#[test]
fn unknown_code_carries_sentinel() {
    let err = StoreErrors::error_description("NOPE_404").unwrap_err();
    assert_eq!(err, ManagerError::code_not_found("NOPE_404"));
    assert!(err.to_string().contains("ER_GETERROR_00001"));
}

#[test]
fn constants_are_ordinary_descriptors() {
    let declined: &ErrorDescriptor = &BillingErrors::CARD_DECLINED;
    assert_eq!(declined.code(), "BILL_001");
    assert_eq!(
        StoreErrors::error_object(declined).to_string(),
        "[BILL_001] Card declined"
    );
}

#[test]
fn attributes_follow_source_order() {
    let names: Vec<_> = BackofficeErrors::attributes()
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(
        names,
        ["CARD_DECLINED", "CARD_EXPIRED", "ADDRESS_UNKNOWN", "TRAIL_GAP"]
    );
}
