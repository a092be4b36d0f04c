#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Log lines written while serving requests.

mod common;

use tracing_test::traced_test;

use common::{calculate, create_router, get, push};

#[tokio::test]
#[traced_test]
async fn test_independent_success_lines() {
    let router = create_router();
    calculate(&router, "Plus", &[2, 3]).await;

    assert!(logs_contain("Incoming request | #1 | resource: /calculator/independent/calculate | HTTP Verb POST"));
    assert!(logs_contain("Performing operation Plus. Result is 5"));
    assert!(logs_contain("Performing operation: Plus(2,3) = 5"));
    assert!(logs_contain("request #1 duration: "));
}

#[tokio::test]
#[traced_test]
async fn test_stack_lines() {
    let router = create_router();
    push(&router, &[1, 2, 3]).await;
    get(&router, "/calculator/stack/size").await;
    get(&router, "/calculator/stack/operate?operation=times").await;
    get(&router, "/calculator/history?flavor=STACK").await;

    assert!(logs_contain("Adding total of 3 argument(s) to the stack | Stack size: 3"));
    assert!(logs_contain("Adding arguments: 1,2,3 | Stack size before 0 | stack size after 3"));
    assert!(logs_contain("Stack size is 3"));
    assert!(logs_contain("Stack content (first == top): [3, 2, 1]"));
    assert!(logs_contain("Performing operation times. Result is 6 | stack size: 1"));
    assert!(logs_contain("Performing operation: times(3,2) = 6"));
    assert!(logs_contain("History: So far total 1 stack actions"));
    assert!(!logs_contain("independent actions"));
}

#[tokio::test]
#[traced_test]
async fn test_failures_are_logged() {
    let router = create_router();
    calculate(&router, "divide", &[1, 0]).await;
    get(&router, "/calculator/stack/operate?operation=abs").await;
    get(&router, "/logs/level?logger-name=root").await;

    assert!(logs_contain(
        "Server encountered an error ! message: Error while performing operation Divide: division by 0"
    ));
    assert!(logs_contain(
        "Server encountered an error ! message: Error: cannot implement operation abs. It requires 1 arguments and the stack has only 0 arguments"
    ));
    assert!(logs_contain(
        "Server encountered an error ! message: No log by the name 'root'"
    ));
    assert!(logs_contain("request #3 duration: "));
}
