//! Behaviour tests for page-number pagination.

use std::cell::RefCell;

use pagination::{Page, PageParam, PageRequest, PageRequestError, paginate};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct PaginationWorld {
    items: RefCell<Vec<u64>>,
    outcome: RefCell<Option<Result<Page<u64>, PageRequestError>>>,
}

impl PaginationWorld {
    fn with_page<F>(&self, f: F)
    where
        F: FnOnce(&Page<u64>),
    {
        let outcome = self.outcome.borrow();
        let page = outcome
            .as_ref()
            .expect("pagination was attempted")
            .as_ref()
            .expect("pagination should succeed");
        f(page);
    }
}

#[fixture]
fn world() -> PaginationWorld {
    PaginationWorld::default()
}

#[given("a collection of {count} items")]
fn a_collection_of_items(world: &PaginationWorld, count: u64) {
    *world.items.borrow_mut() = (1..=count).collect();
}

#[when("page {page} is requested with size {size}")]
fn page_is_requested_with_size(world: &PaginationWorld, page: i64, size: i64) {
    let items = world.items.borrow();
    let outcome = PageRequest::new(page, size).map(|request| paginate(&items, request));
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the page holds {count} items")]
fn the_page_holds_items(world: &PaginationWorld, count: usize) {
    world.with_page(|page| assert_eq!(page.items.len(), count));
}

#[then("the total is {total}")]
fn the_total_is(world: &PaginationWorld, total: u64) {
    world.with_page(|page| assert_eq!(page.total, total));
}

#[then("the first item is {item}")]
fn the_first_item_is(world: &PaginationWorld, item: u64) {
    world.with_page(|page| assert_eq!(page.items.first(), Some(&item)));
}

#[then("the request is rejected for size")]
fn the_request_is_rejected_for_size(world: &PaginationWorld) {
    let outcome = world.outcome.borrow();
    let error = match outcome.as_ref().expect("pagination was attempted") {
        Ok(_) => panic!("expected the request to be rejected"),
        Err(error) => *error,
    };
    assert_eq!(error.param(), PageParam::Size);
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "The first page is full"
)]
fn the_first_page_is_full(world: PaginationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "The final page is partial"
)]
fn the_final_page_is_partial(world: PaginationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "A page beyond the end is empty"
)]
fn a_page_beyond_the_end_is_empty(world: PaginationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "An oversized page is rejected"
)]
fn an_oversized_page_is_rejected(world: PaginationWorld) {
    drop(world);
}
