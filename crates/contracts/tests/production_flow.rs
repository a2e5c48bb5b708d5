mod common;

use assert_matches::assert_matches;
use common::*;
use threadline_contracts::{audit, production};
use threadline_core::asset_kind::AssetKind;
use threadline_core::error::CoreError;
use threadline_core::types::OrgId;
use threadline_ledger::models::Asset;

/// Two approved bales packed into `lot_b`, as the spinner.
fn with_bale_lot() -> Harness {
    let h = Harness::production();
    for (id, weight) in [("cottonbale_1", 50.0), ("cottonbale_2", 30.0)] {
        h.run(ORG_SPINNER, |ctx| production::create_cotton_bale(ctx, bale(id, weight, true)))
            .unwrap();
    }
    h.run(ORG_SPINNER, |ctx| {
        let input = lot("lot_b", "cottonbale_", &["cottonbale_1", "cottonbale_2"], 80.0);
        production::create_lot(ctx, input)
    })
    .unwrap();
    h
}

/// `with_bale_lot` carried through yarn and fabric to `lot_ff`, a lot of
/// finished fabric held by the fabric mill.
fn with_fabric_lot() -> Harness {
    let h = with_bale_lot();
    h.run(ORG_SPINNER, |ctx| {
        production::create_cotton_yarn(ctx, yarn("cottonyarn_1", &["lot_b"], 78.0))
    })
    .unwrap();
    h.run(ORG_SPINNER, |ctx| {
        production::create_lot(ctx, lot("lot_y", "cottonyarn_", &["cottonyarn_1"], 78.0))
    })
    .unwrap();
    h.run(ORG_FABRIC_MILL, |ctx| {
        production::create_unfinished_fabric(ctx, fabric("unfinishedfabric_1", &["lot_y"], 75.0))
    })
    .unwrap();
    h.run(ORG_FABRIC_MILL, |ctx| {
        let input = lot("lot_uf", "unfinishedfabric_", &["unfinishedfabric_1"], 75.0);
        production::create_lot(ctx, input)
    })
    .unwrap();
    h.run(ORG_FABRIC_MILL, |ctx| {
        production::create_finished_fabric(ctx, fabric("finishedfabric_1", &["lot_uf"], 74.0))
    })
    .unwrap();
    h.run(ORG_FABRIC_MILL, |ctx| {
        production::create_lot(ctx, lot("lot_ff", "finishedfabric_", &["finishedfabric_1"], 74.0))
    })
    .unwrap();
    h
}

/// Garment parts: `cutpart_1`, `button_1` and `button_2`, with `button_1`
/// also shipped in `lot_btn`.
fn with_garment_parts() -> Harness {
    let h = with_fabric_lot();
    h.run(ORG_GARMENT_FACTORY, |ctx| {
        production::create_cut_part(ctx, cut_part("cutpart_1", &["lot_ff"], 20.0))
    })
    .unwrap();
    for id in ["button_1", "button_2"] {
        h.run(ORG_GARMENT_FACTORY, |ctx| production::create_button(ctx, button(id, 0.5)))
            .unwrap();
    }
    h.run(ORG_GARMENT_FACTORY, |ctx| {
        production::create_lot(ctx, lot("lot_btn", "button_", &["button_1"], 0.5))
    })
    .unwrap();
    h
}

fn sew(h: &Harness, approval: bool) {
    h.run(ORG_GARMENT_FACTORY, |ctx| {
        let buttons = ["button_1", "button_2"];
        let input = garment("assembledgarment_1", &buttons, &["cutpart_1"], 21.0, approval);
        production::create_assembled_garment(ctx, input)
    })
    .unwrap();
}

// -- Weight scenario ----

#[test]
fn lot_reconciles_declared_weight_against_content() {
    let h = Harness::production();
    h.run(ORG_SPINNER, |ctx| production::create_cotton_bale(ctx, bale("cottonbale_1", 50.0, true)))
        .unwrap();

    let packed = h
        .run(ORG_SPINNER, |ctx| {
            production::create_lot(ctx, lot("lot_1", "cottonbale_", &["cottonbale_1"], 48.0))
        })
        .unwrap();
    assert!(approx(packed.content_weight, 50.0));
    assert!(approx(packed.weight_difference, -4.0));
    assert_eq!(packed.quantity, 1);
    assert_eq!(packed.owner.as_str(), ORG_SPINNER);
    assert_eq!(packed.previous_owner, None);
    assert!(packed.all_assets_approved);

    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_lot(ctx, lot("lot_2", "cottonbale_", &["cottonbale_1"], 50.0))
        }),
        Err(CoreError::AssetAlreadyContained { id, container })
            if id == "cottonbale_1" && container == "lot_1"
    );
}

// -- Full bill of materials ----

#[test]
fn bale_to_container_chain() {
    let h = with_garment_parts();

    let spun = h.query(|tx| audit::get_asset(tx, "cottonyarn_1")).unwrap();
    assert_matches!(
        spun,
        Asset::CottonYarn(yarn)
            if approx(yarn.content_weight, 80.0) && approx(yarn.weight_difference, -2.5)
    );

    let sewn = h
        .run(ORG_GARMENT_FACTORY, |ctx| {
            let buttons = ["button_1", "button_2"];
            let input = garment("assembledgarment_1", &buttons, &["cutpart_1"], 21.0, true);
            production::create_assembled_garment(ctx, input)
        })
        .unwrap();
    assert!(approx(sewn.content_weight, 21.0));
    assert!(approx(sewn.weight_difference, 0.0));

    let packed = h
        .run(ORG_GARMENT_FACTORY, |ctx| {
            let input = carton("carton_1", &["assembledgarment_1"], ORG_GARMENT_FACTORY, 22.0);
            production::create_carton(ctx, input)
        })
        .unwrap();
    assert!(packed.all_assets_approved);
    assert_eq!(packed.quantity, 1);

    let loaded = h
        .run(ORG_GARMENT_FACTORY, |ctx| {
            production::create_container(ctx, container("container_1", &["carton_1"], 22.0))
        })
        .unwrap();
    assert!(approx(loaded.content_weight, 22.0));

    assert_eq!(h.query(audit::get_all_assets_count).unwrap(), 16);
    assert_eq!(h.query(|tx| audit::count_of_kind(tx, AssetKind::Lot)).unwrap(), 5);
    assert_eq!(
        h.query(|tx| audit::count_lots_of_kind(tx, AssetKind::CottonYarn)).unwrap(),
        1
    );
    assert_matches!(
        h.query(|tx| audit::get_asset(tx, "container_1")).unwrap(),
        Asset::Container(c) if c.content == ids(&["carton_1"])
    );
}

#[test]
fn carton_approval_reflects_its_garments() {
    let h = with_garment_parts();
    sew(&h, false);
    let packed = h
        .run(ORG_GARMENT_FACTORY, |ctx| {
            let input = carton("carton_1", &["assembledgarment_1"], ORG_GARMENT_FACTORY, 21.0);
            production::create_carton(ctx, input)
        })
        .unwrap();
    assert!(!packed.all_assets_approved);
}

// -- Composition rules ----

#[test]
fn lot_kind_must_be_lotable() {
    let h = with_bale_lot();
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_lot(ctx, lot("lot_2", "carton_", &["cottonbale_1"], 1.0))
        }),
        Err(CoreError::UnknownAssetKind(prefix)) if prefix == "carton_"
    );
}

#[test]
fn lot_creation_depends_on_declared_kind() {
    let h = with_bale_lot();
    h.run(ORG_SPINNER, |ctx| production::create_cotton_bale(ctx, bale("cottonbale_3", 10.0, true)))
        .unwrap();
    assert_matches!(
        h.run(ORG_FABRIC_MILL, |ctx| {
            production::create_lot(ctx, lot("lot_2", "cottonbale_", &["cottonbale_3"], 10.0))
        }),
        Err(CoreError::Unauthorized { invoker, .. }) if invoker.as_str() == ORG_FABRIC_MILL
    );
    h.run(ORG_SUPPLIER, |ctx| {
        production::create_lot(ctx, lot("lot_2", "cottonbale_", &["cottonbale_3"], 10.0))
    })
    .unwrap();
}

#[test]
fn lot_content_must_be_approved_and_unflagged() {
    let h = Harness::production();
    h.run(ORG_SPINNER, |ctx| production::create_cotton_bale(ctx, bale("cottonbale_1", 10.0, false)))
        .unwrap();
    let mut flagged = bale("cottonbale_2", 10.0, true);
    flagged.is_flagged = true;
    flagged.flag_reason = "moisture above limit".to_string();
    h.run(ORG_SPINNER, |ctx| production::create_cotton_bale(ctx, flagged))
        .unwrap();

    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_lot(ctx, lot("lot_1", "cottonbale_", &["cottonbale_1"], 10.0))
        }),
        Err(CoreError::ConstituentNotApproved { id }) if id == "cottonbale_1"
    );
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_lot(ctx, lot("lot_1", "cottonbale_", &["cottonbale_2"], 10.0))
        }),
        Err(CoreError::ConstituentFlagged { id }) if id == "cottonbale_2"
    );
}

#[test]
fn malformed_content_lists_are_rejected() {
    let h = with_bale_lot();
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_cotton_yarn(ctx, yarn("cottonyarn_1", &[], 1.0))
        }),
        Err(CoreError::EmptyComposition { slot: "Content" })
    );
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_cotton_yarn(ctx, yarn("cottonyarn_1", &["lot_b", "lot_b"], 1.0))
        }),
        Err(CoreError::DuplicateInComposition { id }) if id == "lot_b"
    );
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_cotton_yarn(ctx, yarn("cottonyarn_1", &["cottonbale_1"], 1.0))
        }),
        Err(CoreError::CompositionTypeMismatch { expected_prefix, .. }) if expected_prefix == "lot_"
    );
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_cotton_yarn(ctx, yarn("cottonyarn_1", &["lot_9"], 1.0))
        }),
        Err(CoreError::NotFound { id, .. }) if id == "lot_9"
    );
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_lot(ctx, lot("lot_2", "cottonbale_", &["button_1"], 1.0))
        }),
        Err(CoreError::CompositionTypeMismatch { id, .. }) if id == "button_1"
    );
}

#[test]
fn lot_of_wrong_kind_cannot_feed_a_composite() {
    let h = with_garment_parts();
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::create_cotton_yarn(ctx, yarn("cottonyarn_1", &["lot_btn"], 1.0))
        }),
        Err(CoreError::CompositionTypeMismatch { id, expected_prefix })
            if id == "lot_btn" && expected_prefix == "cottonbale_"
    );
}

#[test]
fn garment_checks_both_slots() {
    let h = with_garment_parts();
    assert_matches!(
        h.run(ORG_GARMENT_FACTORY, |ctx| {
            let input = garment("assembledgarment_1", &["button_2"], &[], 1.0, true);
            production::create_assembled_garment(ctx, input)
        }),
        Err(CoreError::EmptyComposition { slot: "CutParts" })
    );
    assert_matches!(
        h.run(ORG_GARMENT_FACTORY, |ctx| {
            let input = garment("assembledgarment_1", &["cutpart_1"], &["cutpart_1"], 1.0, true);
            production::create_assembled_garment(ctx, input)
        }),
        Err(CoreError::CompositionTypeMismatch { expected_prefix, .. })
            if expected_prefix == "button_"
    );
}

#[test]
fn shipment_and_assembly_scopes_are_independent() {
    let h = with_garment_parts();
    // button_1 already ships in lot_btn.
    sew(&h, true);
    assert_matches!(
        h.run(ORG_GARMENT_FACTORY, |ctx| {
            production::create_assembled_garment(
                ctx,
                garment("assembledgarment_2", &["button_1"], &["cutpart_1"], 21.0, true),
            )
        }),
        Err(CoreError::AssetAlreadyContained { id, container })
            if id == "button_1" && container == "assembledgarment_1"
    );
    assert_eq!(
        h.query(|tx| audit::count_lots_of_kind(tx, AssetKind::Button)).unwrap(),
        1
    );
    assert_matches!(
        h.query(|tx| audit::count_lots_of_kind(tx, AssetKind::Carton)),
        Err(CoreError::UnknownAssetKind(_))
    );
}

// -- Ownership ----

#[test]
fn lot_transfer_follows_wrapped_kind() {
    let h = with_bale_lot();
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::transfer_ownership(ctx, "lot_b", OrgId::from(ORG_FABRIC_MILL))
        }),
        Err(CoreError::OwnerNotEligible { owner, .. }) if owner.as_str() == ORG_FABRIC_MILL
    );
    assert_matches!(
        h.run(ORG_FABRIC_MILL, |ctx| {
            production::transfer_ownership(ctx, "lot_b", OrgId::from(ORG_SUPPLIER))
        }),
        Err(CoreError::Unauthorized { .. })
    );

    let moved = h
        .run(ORG_SPINNER, |ctx| {
            production::transfer_ownership(ctx, "lot_b", OrgId::from(ORG_SUPPLIER))
        })
        .unwrap();
    assert_matches!(
        moved,
        Asset::Lot(lot) if lot.owner.as_str() == ORG_SUPPLIER
            && lot.previous_owner.as_ref().map(OrgId::as_str) == Some(ORG_SPINNER)
    );
}

#[test]
fn lot_owner_can_be_named_at_creation() {
    let h = Harness::production();
    h.run(ORG_SPINNER, |ctx| production::create_cotton_bale(ctx, bale("cottonbale_1", 50.0, true)))
        .unwrap();
    let before = h.snapshot();

    let mut input = lot("lot_b", "cottonbale_", &["cottonbale_1"], 50.0);
    input.owner = Some(OrgId::from(ORG_FABRIC_MILL));
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| production::create_lot(ctx, input)),
        Err(CoreError::OwnerNotEligible { owner, .. }) if owner.as_str() == ORG_FABRIC_MILL
    );
    assert_eq!(h.snapshot(), before);

    let mut input = lot("lot_b", "cottonbale_", &["cottonbale_1"], 50.0);
    input.owner = Some(OrgId::from(ORG_SUPPLIER));
    let packed = h.run(ORG_SPINNER, |ctx| production::create_lot(ctx, input)).unwrap();
    assert_eq!(packed.owner.as_str(), ORG_SUPPLIER);
    assert_eq!(packed.creator_id.as_str(), ORG_SPINNER);
    assert_eq!(packed.previous_owner, None);
}

#[test]
fn only_lots_and_cartons_change_hands() {
    let h = with_bale_lot();
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::transfer_ownership(ctx, "cottonbale_1", OrgId::from(ORG_SUPPLIER))
        }),
        Err(CoreError::InvalidIdentifier { id, .. }) if id == "cottonbale_1"
    );
    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::transfer_ownership(ctx, "lot_missing", OrgId::from(ORG_SUPPLIER))
        }),
        Err(CoreError::NotFound { .. })
    );
}

#[test]
fn carton_owner_must_be_eligible() {
    let h = with_garment_parts();
    sew(&h, true);
    assert_matches!(
        h.run(ORG_GARMENT_FACTORY, |ctx| {
            let input = carton("carton_1", &["assembledgarment_1"], ORG_SPINNER, 21.0);
            production::create_carton(ctx, input)
        }),
        Err(CoreError::OwnerNotEligible { owner, .. }) if owner.as_str() == ORG_SPINNER
    );
}

#[test]
fn carton_changes_hands_within_its_allow_set() {
    let h = with_garment_parts();
    sew(&h, true);
    h.run(ORG_GARMENT_FACTORY, |ctx| {
        let input = carton("carton_1", &["assembledgarment_1"], ORG_GARMENT_FACTORY, 21.0);
        production::create_carton(ctx, input)
    })
    .unwrap();

    assert_matches!(
        h.run(ORG_SPINNER, |ctx| {
            production::transfer_ownership(ctx, "carton_1", OrgId::from(ORG_RETAILER))
        }),
        Err(CoreError::Unauthorized { .. })
    );
    let moved = h
        .run(ORG_GARMENT_FACTORY, |ctx| {
            production::transfer_ownership(ctx, "carton_1", OrgId::from(ORG_RETAILER))
        })
        .unwrap();
    assert_matches!(
        moved,
        Asset::Carton(carton) if carton.owner.as_str() == ORG_RETAILER
            && carton.previous_owner.as_ref().map(OrgId::as_str) == Some(ORG_GARMENT_FACTORY)
    );
}

// -- Audit ----

#[test]
fn flag_and_notes_update_any_asset() {
    let h = with_bale_lot();
    assert_matches!(
        h.run(ORG_RETAILER, |ctx| audit::set_flag(ctx, "cottonbale_1", true, "N/A".to_string())),
        Err(CoreError::InvalidFlagState(_))
    );

    let flagged = h
        .run(ORG_RETAILER, |ctx| audit::set_flag(ctx, "lot_b", true, "seal broken".to_string()))
        .unwrap();
    assert!(flagged.is_flagged());

    let noted = h
        .run(ORG_AUDITOR, |ctx| audit::set_notes(ctx, "lot_b", "inspected at gate 4".to_string()))
        .unwrap();
    assert!(noted.is_flagged());
    assert!(noted.updated_at() > flagged.updated_at());
    assert_matches!(
        noted,
        Asset::Lot(lot) if lot.notes == "inspected at gate 4" && lot.flag_reason == "seal broken"
    );
}
