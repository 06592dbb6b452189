/// Integration tests for the Taskboard API
///
/// These tests run the full router over the in-memory backend:
/// - User, board, list, and task CRUD with the documented wire formats
/// - Default list skeleton and owner membership on board creation
/// - Dense position maintenance across task moves
/// - Validation, not-found, and conflict error responses
mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use taskboard_shared::DEMO_USER_ID;

/// Health endpoint reports the active backend
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert!(body["version"].is_string());
}

/// Full user lifecycle: create, read, update, delete
#[tokio::test]
async fn test_user_crud() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "alice@example.com", "Alice").await;
    let id = user["id"].as_str().unwrap().to_string();
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["name"], "Alice");

    let (status, fetched) = ctx.get(&format!("/api/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], user["id"]);

    let (status, updated) = ctx
        .put(
            &format!("/api/users/{id}"),
            json!({ "email": "alice@taskboard.dev", "name": "Alice B" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "alice@taskboard.dev");
    assert_eq!(updated["name"], "Alice B");

    let (status, body) = ctx.delete(&format!("/api/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, body) = ctx.get(&format!("/api/users/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

/// Creating a user with an email already in use is a conflict
#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let ctx = TestContext::new();

    common::create_user(&ctx, "bob@example.com", "Bob").await;

    let (status, body) = ctx
        .post(
            "/api/users",
            json!({ "email": "bob@example.com", "name": "Robert" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists");
}

/// Updating a user to an email already in use is a conflict
#[tokio::test]
async fn test_update_to_duplicate_email_is_conflict() {
    let ctx = TestContext::new();

    common::create_user(&ctx, "first@example.com", "First").await;
    let second = common::create_user(&ctx, "second@example.com", "Second").await;
    let second_id = second["id"].as_str().unwrap();

    let (status, body) = ctx
        .put(
            &format!("/api/users/{second_id}"),
            json!({ "email": "first@example.com", "name": "Second" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists");

    // Re-submitting your own email is fine
    let (status, updated) = ctx
        .put(
            &format!("/api/users/{second_id}"),
            json!({ "email": "second@example.com", "name": "Renamed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Renamed");
}

/// Users require both email and name
#[tokio::test]
async fn test_user_missing_fields() {
    let ctx = TestContext::new();

    let (status, body) = ctx.post("/api/users", json!({ "email": "x@y.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email and name are required");

    // Blank strings count as missing
    let (status, body) = ctx
        .post("/api/users", json!({ "email": "x@y.com", "name": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email and name are required");
}

/// A new board gets the default three lists and an owner membership
#[tokio::test]
async fn test_board_creation_seeds_defaults() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "carol@example.com", "Carol").await;
    let user_id = user["id"].as_str().unwrap();

    let board = common::create_board(&ctx, "Sprint 1", user_id).await;
    let board_id = board["id"].as_str().unwrap();

    let lists = common::board_lists(&ctx, board_id).await;
    let titles: Vec<&str> = lists.iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["To Do", "In Progress", "Done"]);
    let positions: Vec<i64> = lists.iter().map(|l| l["position"].as_i64().unwrap()).collect();
    assert_eq!(positions, [0, 1, 2]);

    let (status, with_members) = ctx.get(&format!("/api/boards/{board_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_members["title"], "Sprint 1");
    let members = with_members["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"].as_str().unwrap(), user_id);
    assert_eq!(members[0]["role"], "owner");
}

/// Listing boards requires a user_id query parameter
#[tokio::test]
async fn test_board_list_requires_user_id() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/boards").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user_id is required");
}

/// A board is visible to its members, not only its owner
#[tokio::test]
async fn test_member_sees_shared_board() {
    let ctx = TestContext::new();

    let owner = common::create_user(&ctx, "dave@example.com", "Dave").await;
    let guest = common::create_user(&ctx, "erin@example.com", "Erin").await;
    let owner_id = owner["id"].as_str().unwrap();
    let guest_id = guest["id"].as_str().unwrap();

    let board = common::create_board(&ctx, "Shared", owner_id).await;
    let board_id = board["id"].as_str().unwrap();

    // Not visible before membership
    let (_, boards) = ctx.get(&format!("/api/boards?user_id={guest_id}")).await;
    assert!(boards.as_array().unwrap().is_empty());

    let (status, member) = ctx
        .post(
            &format!("/api/boards/{board_id}/members"),
            json!({ "user_id": guest_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["role"], "member");
    assert_eq!(member["name"], "Erin");

    let (_, boards) = ctx.get(&format!("/api/boards?user_id={guest_id}")).await;
    let boards = boards.as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["id"].as_str().unwrap(), board_id);
}

/// Board update and delete round-trip
#[tokio::test]
async fn test_board_update_and_delete() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "frank@example.com", "Frank").await;
    let board = common::create_board(&ctx, "Old title", user["id"].as_str().unwrap()).await;
    let board_id = board["id"].as_str().unwrap();

    let (status, body) = ctx
        .put(&format!("/api/boards/{board_id}"), json!({ "description": "no title" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    let (status, updated) = ctx
        .put(
            &format!("/api/boards/{board_id}"),
            json!({ "title": "New title", "description": "Q3 work" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New title");
    assert_eq!(updated["description"], "Q3 work");

    let (status, body) = ctx.delete(&format!("/api/boards/{board_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Board deleted successfully");

    let (status, body) = ctx.get(&format!("/api/boards/{board_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Board not found");
}

/// Duplicate membership is a conflict; removing a non-member is not found
#[tokio::test]
async fn test_membership_errors() {
    let ctx = TestContext::new();

    let owner = common::create_user(&ctx, "gina@example.com", "Gina").await;
    let guest = common::create_user(&ctx, "hank@example.com", "Hank").await;
    let guest_id = guest["id"].as_str().unwrap();

    let board = common::create_board(&ctx, "Team board", owner["id"].as_str().unwrap()).await;
    let board_id = board["id"].as_str().unwrap();

    let (status, _) = ctx
        .post(
            &format!("/api/boards/{board_id}/members"),
            json!({ "user_id": guest_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx
        .post(
            &format!("/api/boards/{board_id}/members"),
            json!({ "user_id": guest_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User is already a member of this board");

    let (status, body) = ctx
        .delete(&format!("/api/boards/{board_id}/members/{guest_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Member removed from board successfully");

    let (status, body) = ctx
        .delete(&format!("/api/boards/{board_id}/members/{guest_id}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Board member not found");
}

/// Tasks created without an explicit position are appended
#[tokio::test]
async fn test_task_positions_append() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "ivan@example.com", "Ivan").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();

    common::create_task(&ctx, "Fix bug", todo).await;
    common::create_task(&ctx, "Write docs", todo).await;
    let last = common::create_task(&ctx, "Ship release", todo).await;
    assert_eq!(last["position"], 2);
    assert_eq!(last["priority"], "medium");
    assert_eq!(last["completed"], false);

    let tasks = common::list_tasks(&ctx, todo).await;
    let positions: Vec<i64> = tasks.iter().map(|t| t["position"].as_i64().unwrap()).collect();
    assert_eq!(positions, [0, 1, 2]);
}

/// Moving a task within its list renumbers the displaced siblings
#[tokio::test]
async fn test_move_within_list() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "judy@example.com", "Judy").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();

    common::create_task(&ctx, "Fix bug", todo).await;
    common::create_task(&ctx, "Write docs", todo).await;
    let ship = common::create_task(&ctx, "Ship release", todo).await;
    let ship_id = ship["id"].as_str().unwrap();

    let (status, moved) = ctx
        .patch(
            &format!("/api/tasks/{ship_id}/move"),
            json!({ "new_list_id": todo, "new_position": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["position"], 0);
    assert_eq!(moved["list_id"].as_str().unwrap(), todo);

    let tasks = common::list_tasks(&ctx, todo).await;
    let titles: Vec<&str> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Ship release", "Fix bug", "Write docs"]);
    let positions: Vec<i64> = tasks.iter().map(|t| t["position"].as_i64().unwrap()).collect();
    assert_eq!(positions, [0, 1, 2]);
}

/// Moving a task across lists keeps both lists dense
#[tokio::test]
async fn test_move_across_lists() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "kate@example.com", "Kate").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();
    let doing = lists[1]["id"].as_str().unwrap();

    let fix = common::create_task(&ctx, "Fix bug", todo).await;
    common::create_task(&ctx, "Write docs", todo).await;
    common::create_task(&ctx, "Review PR", doing).await;

    let fix_id = fix["id"].as_str().unwrap();
    let (status, moved) = ctx
        .patch(
            &format!("/api/tasks/{fix_id}/move"),
            json!({ "new_list_id": doing, "new_position": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["list_id"].as_str().unwrap(), doing);
    assert_eq!(moved["position"], 0);

    // Source list closed the gap
    let todo_tasks = common::list_tasks(&ctx, todo).await;
    assert_eq!(todo_tasks.len(), 1);
    assert_eq!(todo_tasks[0]["title"], "Write docs");
    assert_eq!(todo_tasks[0]["position"], 0);

    // Destination shifted its occupant down
    let doing_tasks = common::list_tasks(&ctx, doing).await;
    let titles: Vec<&str> = doing_tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Fix bug", "Review PR"]);
    let positions: Vec<i64> = doing_tasks
        .iter()
        .map(|t| t["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, [0, 1]);
}

/// An out-of-range destination position is clamped to the end
#[tokio::test]
async fn test_move_clamps_position() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "liam@example.com", "Liam").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();
    let doing = lists[1]["id"].as_str().unwrap();

    let task = common::create_task(&ctx, "Fix bug", todo).await;
    common::create_task(&ctx, "Review PR", doing).await;

    let task_id = task["id"].as_str().unwrap();
    let (status, moved) = ctx
        .patch(
            &format!("/api/tasks/{task_id}/move"),
            json!({ "new_list_id": doing, "new_position": 99 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["position"], 1);
}

/// Move requires both destination fields
#[tokio::test]
async fn test_move_missing_fields() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "mona@example.com", "Mona").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();
    let task = common::create_task(&ctx, "Fix bug", todo).await;
    let task_id = task["id"].as_str().unwrap();

    let (status, body) = ctx
        .patch(
            &format!("/api/tasks/{task_id}/move"),
            json!({ "new_position": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "new_list_id and new_position are required");
}

/// Moving an unknown task is a 404
#[tokio::test]
async fn test_move_unknown_task() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "nick@example.com", "Nick").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();

    let (status, body) = ctx
        .patch(
            "/api/tasks/00000000-0000-0000-0000-000000000000/move",
            json!({ "new_list_id": todo, "new_position": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");
}

/// The aggregate endpoint returns every task of the board, ordered by
/// list position then task position
#[tokio::test]
async fn test_board_tasks_aggregate() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "olga@example.com", "Olga").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let board_id = board["id"].as_str().unwrap();
    let lists = common::board_lists(&ctx, board_id).await;
    let todo = lists[0]["id"].as_str().unwrap();
    let doing = lists[1]["id"].as_str().unwrap();

    common::create_task(&ctx, "Review PR", doing).await;
    common::create_task(&ctx, "Fix bug", todo).await;
    common::create_task(&ctx, "Write docs", todo).await;

    let (status, body) = ctx.get(&format!("/api/boards/{board_id}/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Fix bug", "Write docs", "Review PR"]);
}

/// Toggle flips the completion flag back and forth
#[tokio::test]
async fn test_toggle_task() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "pete@example.com", "Pete").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();
    let task = common::create_task(&ctx, "Fix bug", todo).await;
    let task_id = task["id"].as_str().unwrap();

    let (status, toggled) = ctx
        .patch(&format!("/api/tasks/{task_id}/toggle"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], true);

    let (_, toggled) = ctx
        .patch(&format!("/api/tasks/{task_id}/toggle"), json!({}))
        .await;
    assert_eq!(toggled["completed"], false);
}

/// PUT semantics: title required, omitted completed is kept, omitted
/// description is cleared
#[tokio::test]
async fn test_task_update_semantics() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "rita@example.com", "Rita").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();

    let (status, task) = ctx
        .post(
            "/api/tasks",
            json!({
                "title": "Fix bug",
                "list_id": todo,
                "description": "crash on save",
                "priority": "high"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = task["id"].as_str().unwrap();

    let (status, body) = ctx
        .put(&format!("/api/tasks/{task_id}"), json!({ "priority": "low" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    // Mark completed, then update with completed omitted
    ctx.patch(&format!("/api/tasks/{task_id}/toggle"), json!({}))
        .await;

    let (status, updated) = ctx
        .put(
            &format!("/api/tasks/{task_id}"),
            json!({ "title": "Fix crash" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Fix crash");
    assert_eq!(updated["completed"], true, "omitted completed must be kept");
    assert_eq!(updated["priority"], "high", "omitted priority must be kept");
    assert!(
        updated["description"].is_null(),
        "omitted description must be cleared"
    );
}

/// Creating a task without a title or list is rejected
#[tokio::test]
async fn test_task_missing_fields() {
    let ctx = TestContext::new();

    let (status, body) = ctx.post("/api/tasks", json!({ "title": "Orphan" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title and list_id are required");

    let (status, body) = ctx.get("/api/tasks").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "list_id is required");
}

/// Malformed IDs and query strings answer in the JSON wire format
#[tokio::test]
async fn test_malformed_ids_answer_in_json() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/tasks/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "expected JSON error body: {body}");

    let (status, body) = ctx.get("/api/boards?user_id=not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "expected JSON error body: {body}");

    let (status, body) = ctx
        .patch("/api/tasks/nope/move", json!({ "new_position": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "expected JSON error body: {body}");
}

/// Deleting a list does not cascade to its tasks
#[tokio::test]
async fn test_delete_list_leaves_tasks() {
    let ctx = TestContext::new();

    let user = common::create_user(&ctx, "sara@example.com", "Sara").await;
    let board = common::create_board(&ctx, "Sprint 1", user["id"].as_str().unwrap()).await;
    let lists = common::board_lists(&ctx, board["id"].as_str().unwrap()).await;
    let todo = lists[0]["id"].as_str().unwrap();
    let task = common::create_task(&ctx, "Fix bug", todo).await;
    let task_id = task["id"].as_str().unwrap();

    let (status, body) = ctx.delete(&format!("/api/lists/{todo}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "List deleted successfully");

    let (status, _) = ctx.get(&format!("/api/tasks/{task_id}")).await;
    assert_eq!(status, StatusCode::OK);
}

/// The seeded demo data is reachable through the API
#[tokio::test]
async fn test_demo_seed() {
    let ctx = TestContext::with_demo_data();

    let (status, boards) = ctx
        .get(&format!("/api/boards?user_id={DEMO_USER_ID}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let boards = boards.as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["title"], "Sample Board");

    let board_id = boards[0]["id"].as_str().unwrap();
    let lists = common::board_lists(&ctx, board_id).await;
    assert_eq!(lists.len(), 3);

    let (status, tasks) = ctx.get(&format!("/api/boards/{board_id}/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"], "Sample Task");
}
