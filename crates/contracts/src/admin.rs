//! Admin channel operations: orders, plans, and factories.

use threadline_core::asset_kind::AssetKind;
use threadline_core::authorization::{authorize, AllowSet, Operation};
use threadline_core::error::CoreError;
use threadline_core::lifecycle::{
    factory_transition, order_transition, plan_transition, FactoryGate, FactoryStatus, OrderGate,
    PlanGate, PlanStatus,
};
use threadline_core::specs::{require_chronological, require_prefix, validate_flag};
use threadline_ledger::models::admin::{
    CreateFactory, CreateOrder, CreatePlan, Factory, Order, Plan,
};
use threadline_ledger::models::Record;

use crate::checks::{load, require_new, save};
use crate::context::TxContext;

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

pub fn create_order(ctx: &mut TxContext<'_>, input: CreateOrder) -> Result<Order, CoreError> {
    ctx.authorize(Operation::CreateOrder)?;
    require_new(ctx, AssetKind::Order, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    require_chronological(&[input.created_at, ctx.now, input.delivery_date])?;

    let order = Order::issue(input, ctx.invoker.clone(), ctx.now);
    save(ctx, &order)?;
    Ok(order)
}

/// The referenced order and every listed factory must already exist.
pub fn create_plan(ctx: &mut TxContext<'_>, input: CreatePlan) -> Result<Plan, CoreError> {
    ctx.authorize(Operation::CreatePlan)?;
    require_new(ctx, AssetKind::Plan, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    load::<Order>(ctx, &input.order_id)?;
    for factory_id in &input.factories {
        load::<Factory>(ctx, factory_id)?;
    }
    require_chronological(&[input.created_at, ctx.now])?;

    let plan = Plan::issue(input, ctx.invoker.clone(), ctx.now);
    save(ctx, &plan)?;
    Ok(plan)
}

pub fn create_factory(ctx: &mut TxContext<'_>, input: CreateFactory) -> Result<Factory, CoreError> {
    ctx.authorize(Operation::CreateFactory)?;
    require_new(ctx, AssetKind::Factory, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    require_chronological(&[input.start_date, ctx.now])?;

    let factory = Factory::register(input, ctx.invoker.clone(), ctx.now);
    save(ctx, &factory)?;
    Ok(factory)
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Only the order's receiver may accept or decline it, naming the plan that
/// will fulfil it.
pub fn set_order_acceptance(
    ctx: &mut TxContext<'_>,
    order_id: &str,
    plan_id: &str,
    acceptance: bool,
) -> Result<Order, CoreError> {
    let mut order: Order = load(ctx, order_id)?;
    authorize(&ctx.invoker, &AllowSet::only([order.receiver_id.clone()]))?;
    require_prefix(plan_id, AssetKind::Plan.prefix())?;
    load::<Plan>(ctx, plan_id)?;

    order.plan_id = Some(plan_id.to_string());
    order.is_accepted = acceptance;
    order.touch(ctx.now)?;
    require_chronological(&[order.created_at, order.updated_at, order.delivery_date])?;

    save(ctx, &order)?;
    Ok(order)
}

pub fn set_order_status(
    ctx: &mut TxContext<'_>,
    order_id: &str,
    new_status: &str,
) -> Result<Order, CoreError> {
    ctx.authorize(Operation::SetOrderStatus)?;
    let mut order: Order = load(ctx, order_id)?;
    let plan_approved = match &order.plan_id {
        Some(plan_id) => load::<Plan>(ctx, plan_id)?.status == PlanStatus::Approved,
        None => false,
    };

    let gate = OrderGate {
        status: order.status,
        is_accepted: order.is_accepted,
        is_flagged: order.is_flagged,
        plan_approved,
    };
    order.status = order_transition(&order.id, &gate, new_status)?;
    order.touch(ctx.now)?;

    save(ctx, &order)?;
    Ok(order)
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Records the retailer's or auditor's approval, whichever the invoker is.
pub fn set_plan_approval(
    ctx: &mut TxContext<'_>,
    plan_id: &str,
    approval: bool,
) -> Result<Plan, CoreError> {
    ctx.authorize(Operation::SetPlanApproval)?;
    let mut plan: Plan = load(ctx, plan_id)?;
    let role = ctx.policy.approver_role(&ctx.invoker);
    plan.set_approvals(plan.approvals().record(role, approval));
    plan.touch(ctx.now)?;

    save(ctx, &plan)?;
    Ok(plan)
}

/// Recomputes `AllFactoriesApproved` from the referenced factories, then
/// moves the plan to `approved` if every condition holds.
pub fn set_plan_status(ctx: &mut TxContext<'_>, plan_id: &str) -> Result<Plan, CoreError> {
    ctx.authorize(Operation::SetPlanStatus)?;
    let mut plan: Plan = load(ctx, plan_id)?;

    let mut all_factories_approved = true;
    for factory_id in &plan.factories {
        let factory: Factory = load(ctx, factory_id)?;
        all_factories_approved &= factory.status == FactoryStatus::Approved;
    }
    plan.all_factories_approved = all_factories_approved;

    let gate = PlanGate {
        status: plan.status,
        approvals: plan.approvals(),
        all_factories_approved,
        is_flagged: plan.is_flagged,
    };
    plan.status = plan_transition(&plan.id, &gate)?;
    plan.touch(ctx.now)?;

    save(ctx, &plan)?;
    Ok(plan)
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

pub fn set_factory_approval(
    ctx: &mut TxContext<'_>,
    factory_id: &str,
    approval: bool,
) -> Result<Factory, CoreError> {
    ctx.authorize(Operation::SetFactoryApproval)?;
    let mut factory: Factory = load(ctx, factory_id)?;
    let role = ctx.policy.approver_role(&ctx.invoker);
    factory.set_approvals(factory.approvals().record(role, approval));
    factory.touch(ctx.now)?;

    save(ctx, &factory)?;
    Ok(factory)
}

pub fn set_factory_status(ctx: &mut TxContext<'_>, factory_id: &str) -> Result<Factory, CoreError> {
    ctx.authorize(Operation::SetFactoryStatus)?;
    let mut factory: Factory = load(ctx, factory_id)?;

    let gate = FactoryGate {
        status: factory.status,
        approvals: factory.approvals(),
        is_flagged: factory.is_flagged,
    };
    factory.status = factory_transition(&factory.id, &gate)?;
    factory.touch(ctx.now)?;

    save(ctx, &factory)?;
    Ok(factory)
}
