mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{row_ids, TestApp};
use creativebook::models::{BookingStatus, OrderStatus, UserRole};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn admin_index_lists_registered_models() {
    let app = TestApp::new().await;

    let index = app.get_json("/admin/", StatusCode::OK).await;
    let models = index["apps"][0]["models"].as_array().unwrap();
    assert_eq!(models.len(), 8);
    assert!(models
        .iter()
        .any(|m| m["changelist_url"] == "/admin/core/creativeprofile/"));
}

#[tokio::test]
async fn changelist_rows_follow_list_display_newest_first() {
    let app = TestApp::new().await;
    let creative = app.seed_creative("mira", None, true).await;
    let mug = app.seed_product("Glazed Mug", creative.id).await;
    let print = app.seed_product("Risograph Print", creative.id).await;

    let list = app.get_json("/admin/core/product/", StatusCode::OK).await;
    assert_eq!(
        list["columns"],
        json!(["id", "name", "creative", "price", "stock", "image_url"])
    );
    assert_eq!(row_ids(&list), vec![print.id as i64, mug.id as i64]);

    let first = &list["rows"][0]["values"];
    assert_eq!(first[0], json!(print.id));
    assert_eq!(first[1], json!("Risograph Print"));
    // Foreign keys render as the related id.
    assert_eq!(first[2], json!(creative.id));
    assert_eq!(first[5], json!(null));

    assert_eq!(list["pagination"]["total"], json!(2));
    assert_eq!(list["pagination"]["per_page"], json!(100));
}

#[tokio::test]
async fn search_matches_every_term_case_insensitively() {
    let app = TestApp::new().await;
    let ann = app.seed_user("AnnLee", UserRole::Client).await;
    app.seed_user("bob", UserRole::Client).await;

    let list = app.get_json("/admin/core/user/?q=annlee", StatusCode::OK).await;
    assert_eq!(row_ids(&list), vec![ann.id as i64]);
    assert_eq!(list["query"], json!("annlee"));

    // "bob" matches a username but "example" alone matches everyone's email;
    // both terms must hit for a row to be kept.
    let list = app
        .get_json("/admin/core/user/?q=bob%20example", StatusCode::OK)
        .await;
    assert_eq!(row_ids(&list).len(), 1);

    let list = app
        .get_json("/admin/core/user/?q=bob%20nomatch", StatusCode::OK)
        .await;
    assert!(row_ids(&list).is_empty());
}

#[tokio::test]
async fn search_follows_relations_through_foreign_keys() {
    let app = TestApp::new().await;
    let client = app.seed_user("clara", UserRole::Client).await;
    let mira = app.seed_creative("mira", None, true).await;
    let theo = app.seed_creative("theo", None, false).await;

    let with_mira = app
        .seed_booking(client.id, mira.id, date(2025, 3, 10), BookingStatus::Pending)
        .await;
    app.seed_booking(client.id, theo.id, date(2025, 3, 11), BookingStatus::Pending)
        .await;

    // creative__user__username walks bookings -> creative_profiles -> users.
    let list = app.get_json("/admin/core/booking/?q=MIRA", StatusCode::OK).await;
    assert_eq!(row_ids(&list), vec![with_mira.id as i64]);

    // client__username matches both bookings.
    let list = app.get_json("/admin/core/booking/?q=clara", StatusCode::OK).await;
    assert_eq!(row_ids(&list).len(), 2);

    let list = app
        .get_json("/admin/core/creativeprofile/?q=theo", StatusCode::OK)
        .await;
    assert_eq!(row_ids(&list), vec![theo.id as i64]);
}

#[tokio::test]
async fn order_search_covers_client_and_product() {
    let app = TestApp::new().await;
    let client = app.seed_user("dana", UserRole::Client).await;
    let creative = app.seed_creative("mira", None, true).await;
    let mug = app.seed_product("Glazed Mug", creative.id).await;
    let print = app.seed_product("Risograph Print", creative.id).await;
    let mug_order = app.seed_order(client.id, mug.id, OrderStatus::Paid).await;
    app.seed_order(client.id, print.id, OrderStatus::Pending).await;

    let list = app.get_json("/admin/core/order/?q=glazed", StatusCode::OK).await;
    assert_eq!(row_ids(&list), vec![mug_order.id as i64]);

    let list = app.get_json("/admin/core/order/?q=dana", StatusCode::OK).await;
    assert_eq!(row_ids(&list).len(), 2);

    let list = app
        .get_json("/admin/core/order/?status__exact=paid", StatusCode::OK)
        .await;
    assert_eq!(row_ids(&list), vec![mug_order.id as i64]);
}

#[tokio::test]
async fn repeated_filter_key_uses_last_value() {
    let app = TestApp::new().await;
    let clara = app.seed_user("clara", UserRole::Client).await;
    app.seed_user("mira", UserRole::Creative).await;

    let list = app
        .get_json(
            "/admin/core/user/?role__exact=creative&role__exact=client",
            StatusCode::OK,
        )
        .await;
    assert_eq!(row_ids(&list), vec![clara.id as i64]);
}

#[tokio::test]
async fn choice_filter_narrows_users_by_role() {
    let app = TestApp::new().await;
    app.seed_user("clara", UserRole::Client).await;
    let admin = app.seed_user("root", UserRole::Admin).await;

    let list = app
        .get_json("/admin/core/user/?role__exact=admin", StatusCode::OK)
        .await;
    assert_eq!(row_ids(&list), vec![admin.id as i64]);
}

#[tokio::test]
async fn boolean_and_related_filters_narrow_profiles() {
    let app = TestApp::new().await;
    let illustration = app.seed_sub_category("Art", "Illustration").await;
    let verified = app
        .seed_creative("mira", Some(illustration.id), true)
        .await;
    let unverified = app.seed_creative("theo", None, false).await;

    let list = app
        .get_json("/admin/core/creativeprofile/?is_verified__exact=1", StatusCode::OK)
        .await;
    assert_eq!(row_ids(&list), vec![verified.id as i64]);

    let list = app
        .get_json(
            "/admin/core/creativeprofile/?is_verified__exact=false",
            StatusCode::OK,
        )
        .await;
    assert_eq!(row_ids(&list), vec![unverified.id as i64]);

    let uri = format!(
        "/admin/core/creativeprofile/?sub_category__id__exact={}",
        illustration.id
    );
    let list = app.get_json(&uri, StatusCode::OK).await;
    assert_eq!(row_ids(&list), vec![verified.id as i64]);

    let list = app
        .get_json(
            "/admin/core/creativeprofile/?sub_category__isnull=True",
            StatusCode::OK,
        )
        .await;
    assert_eq!(row_ids(&list), vec![unverified.id as i64]);
}

#[tokio::test]
async fn date_filter_selects_a_range() {
    let app = TestApp::new().await;
    let client = app.seed_user("clara", UserRole::Client).await;
    let creative = app.seed_creative("mira", None, true).await;

    app.seed_booking(client.id, creative.id, date(2025, 2, 28), BookingStatus::Completed)
        .await;
    let march = app
        .seed_booking(client.id, creative.id, date(2025, 3, 15), BookingStatus::Confirmed)
        .await;
    app.seed_booking(client.id, creative.id, date(2025, 4, 1), BookingStatus::Pending)
        .await;

    let list = app
        .get_json(
            "/admin/core/booking/?booking_date__gte=2025-03-01&booking_date__lt=2025-04-01",
            StatusCode::OK,
        )
        .await;
    assert_eq!(row_ids(&list), vec![march.id as i64]);

    let list = app
        .get_json(
            "/admin/core/booking/?booking_date__gte=2025-03-01&status__exact=pending",
            StatusCode::OK,
        )
        .await;
    assert_eq!(row_ids(&list).len(), 1);
}

#[tokio::test]
async fn parameters_outside_list_filter_are_rejected() {
    let app = TestApp::new().await;

    for uri in [
        "/admin/core/product/?price__gte=10",
        "/admin/core/user/?email__exact=a@example.com",
        "/admin/core/booking/?booking_date__gte=yesterday",
        "/admin/core/industrycategory/?name__exact=Art",
        "/admin/core/user/?p=0",
    ] {
        let body = app.get_json(uri, StatusCode::BAD_REQUEST).await;
        assert_eq!(body["error"], json!("Bad Request"), "{uri}");
    }
}

#[tokio::test]
async fn pagination_splits_results_into_pages_of_one_hundred() {
    let app = TestApp::new().await;
    for n in 0..105 {
        app.seed_user(&format!("user{n:03}"), UserRole::Client).await;
    }

    let first = app.get_json("/admin/core/user/", StatusCode::OK).await;
    assert_eq!(row_ids(&first).len(), 100);
    assert_eq!(first["pagination"]["total"], json!(105));
    assert_eq!(first["pagination"]["total_pages"], json!(2));
    assert_eq!(first["pagination"]["page"], json!(1));

    let second = app.get_json("/admin/core/user/?p=2", StatusCode::OK).await;
    assert_eq!(row_ids(&second).len(), 5);
    assert!(row_ids(&first).iter().min() > row_ids(&second).iter().max());

    app.get_json("/admin/core/user/?p=3", StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn huge_page_numbers_are_not_found() {
    let app = TestApp::new().await;
    app.seed_user("solo", UserRole::Client).await;

    let max = u64::MAX.to_string();
    for page in ["184467440737095517", max.as_str()] {
        let body = app
            .get_json(&format!("/admin/core/user/?p={page}"), StatusCode::NOT_FOUND)
            .await;
        assert_eq!(body["error"], json!("Not Found"));
    }

    // One past u64 no longer parses as a page at all.
    app.get_json(
        "/admin/core/user/?p=18446744073709551616",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
async fn non_numeric_object_id_is_a_json_not_found() {
    let app = TestApp::new().await;
    app.seed_user("clara", UserRole::Client).await;

    for uri in ["/admin/core/user/abc/", "/admin/core/user/99999999999/"] {
        let body = app.get_json(uri, StatusCode::NOT_FOUND).await;
        assert_eq!(body["error"], json!("Not Found"), "{uri}");
        assert!(body["request_id"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn detail_view_shows_object_and_display_name() {
    let app = TestApp::new().await;
    let creative = app.seed_creative("mira", None, true).await;
    let user = app.seed_user("clara", UserRole::Client).await;

    let detail = app
        .get_json(
            &format!("/admin/core/creativeprofile/{}/", creative.id),
            StatusCode::OK,
        )
        .await;
    assert_eq!(detail["display"], json!(format!("Creative #{}", creative.id)));
    assert_eq!(detail["fields"]["is_verified"], json!(true));

    let detail = app
        .get_json(&format!("/admin/core/user/{}/", user.id), StatusCode::OK)
        .await;
    assert_eq!(detail["display"], json!("clara"));
    assert_eq!(detail["fields"]["role"], json!("client"));

    app.get_json("/admin/core/user/9999/", StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn unknown_models_and_apps_are_not_found() {
    let app = TestApp::new().await;
    app.get_json("/admin/core/invoice/", StatusCode::NOT_FOUND).await;
    app.get_json("/admin/auth/user/", StatusCode::NOT_FOUND).await;
}
