//! Staff-side API: authentication, tables, menu import, settings

mod common;

use std::io::Cursor;

use http::{Method, StatusCode};
use serde_json::json;

use common::{PASSWORD, json_request, multipart_request, spawn};

#[tokio::test]
async fn test_health_is_public() {
    let t = spawn().await;
    let (status, body) = t.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let t = spawn().await;

    let (status, body) = t.get("/admin/tables/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = t.get("/admin/tables/", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    let (status, _) = t.get("/admin/tables/", Some(&t.token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_and_refresh() {
    let t = spawn().await;

    let (status, body) = t
        .public(
            Method::POST,
            "/admin/auth/login/",
            Some(json!({"username": "owner", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, unknown) = t
        .public(
            Method::POST,
            "/admin/auth/login/",
            Some(json!({"username": "nobody", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["message"], body["message"]);

    let (status, pair) = t
        .public(
            Method::POST,
            "/admin/auth/login/",
            Some(json!({"username": "owner", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pair["staff"]["restaurant_id"], t.restaurant_id);
    assert_eq!(pair["expires_in"], 15 * 60);
    let access = pair["access"].as_str().unwrap();
    let refresh = pair["refresh"].as_str().unwrap();

    let (status, _) = t.get("/admin/settings/", Some(access)).await;
    assert_eq!(status, StatusCode::OK);

    // Refresh tokens are not access tokens and vice versa
    let (status, _) = t.get("/admin/settings/", Some(refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = t
        .public(Method::POST, "/admin/auth/refresh/", Some(json!({"refresh": access})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    let (status, renewed) = t
        .public(Method::POST, "/admin/auth/refresh/", Some(json!({"refresh": refresh})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(renewed["access"].is_string());
}

#[tokio::test]
async fn test_disabled_account_cannot_log_in() {
    let t = spawn().await;
    sqlx::query("UPDATE staff SET is_active = 0 WHERE username = 'owner'")
        .execute(&t.state.db)
        .await
        .unwrap();

    let (status, body) = t
        .public(
            Method::POST,
            "/admin/auth/login/",
            Some(json!({"username": "owner", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1007);
}

#[tokio::test]
async fn test_table_registration_and_removal() {
    let t = spawn().await;

    let (status, table) = t.admin(Method::POST, "/admin/tables/", Some(json!({"number": 7}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let qr_url = table["qr_code"].as_str().unwrap();
    assert!(qr_url.starts_with("/media/qr_codes/"));
    let qr_path = t.state.media.path_of(qr_url.trim_start_matches("/media/"));
    assert!(qr_path.is_file());

    // Form inputs send the number as a string
    let (status, form_table) = t
        .admin(Method::POST, "/admin/tables/", Some(json!({"number": "8"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(form_table["number"], 8);

    let (status, body) = t
        .admin(Method::POST, "/admin/tables/", Some(json!({"number": "eight"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);

    let (status, body) = t.admin(Method::POST, "/admin/tables/", Some(json!({"number": 7}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7002);

    let (status, body) = t.admin(Method::POST, "/admin/tables/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "number");

    let (_, tables) = t.admin(Method::GET, "/admin/tables/", None).await;
    assert_eq!(tables.as_array().unwrap().len(), 2);
    assert_eq!(tables[0]["qr_code"], qr_url);

    let uri = format!("/admin/tables/{}/", table["id"]);
    let (status, _) = t.admin(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!qr_path.exists());

    let (status, body) = t.admin(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);

    // Another restaurant may reuse the number
    let (_, other_token) = t.other_restaurant().await;
    let (status, _) = t
        .send(json_request(
            Method::POST,
            "/admin/tables/",
            Some(&other_token),
            Some(json!({"number": 7})),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_menu_item_routes() {
    let t = spawn().await;

    let (status, _) = t.get("/admin/menu/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, item) = t
        .admin(
            Method::POST,
            "/admin/menu/",
            Some(json!({"name": "Masala Chai", "price": 2.5, "is_veg": true})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["cooking_time_minutes"], 10);
    let item_uri = format!("/admin/menu/{}/", item["id"]);

    let (status, items) = t.admin(Method::GET, "/admin/menu/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["name"], "Masala Chai");

    let (status, fetched) = t.admin(Method::GET, &item_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], item["id"]);

    let (status, patched) = t
        .admin(Method::PATCH, &item_uri, Some(json!({"price": 3.0})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["price"], 3.0);
    assert_eq!(patched["name"], "Masala Chai");

    let (status, body) = t
        .admin(Method::POST, "/admin/menu/", Some(json!({"name": "Lassi", "price": -1.0})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, body) = t
        .send(multipart_request(
            "/admin/menu/csv-upload/",
            &t.token,
            "file",
            "empty.csv",
            b"category,is_veg,name,description,price\n",
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 0);

    let (status, _) = t.admin(Method::DELETE, &item_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = t.admin(Method::GET, &item_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, body) = t
        .send(multipart_request(
            &format!("{item_uri}image/"),
            &t.token,
            "file",
            "chai.png",
            b"irrelevant",
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn test_csv_upload() {
    let t = spawn().await;
    let csv = "category,is_veg,name,description,price,is_jain,is_chefs_special,cooking_time_minutes\n\
               Starters,true,Samosa,Crispy,4.50,false,false,10\n\
               Mains,false,Butter Chicken,,13.00,false,true,30\n\
               Mains,false,Broken Row,,not-a-price,false,false,5\n";

    let (status, report) = t
        .send(multipart_request(
            "/admin/menu/csv-upload/",
            &t.token,
            "file",
            "menu.csv",
            csv.as_bytes(),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["created"], 2);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["message"], "2 items uploaded successfully");
    assert_eq!(report["rows"][2]["row"], 3);
    assert_eq!(report["rows"][2]["success"], false);

    let (_, menu) = t
        .get(&format!("/api/restaurants/{}/menu/", t.restaurant_id), None)
        .await;
    let sections: Vec<&str> = menu
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(sections, ["Mains", "Starters"]);
    assert_eq!(menu[0]["items"][0]["is_non_veg"], true);

    let (status, body) = t
        .send(multipart_request(
            "/admin/menu/csv-upload/",
            &t.token,
            "attachment",
            "menu.csv",
            csv.as_bytes(),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5001);
}

#[tokio::test]
async fn test_menu_image_upload() {
    let t = spawn().await;
    let (_, item) = t
        .admin(Method::POST, "/admin/menu/", Some(json!({"name": "Thali", "price": 11.0})))
        .await;

    let img = image::RgbImage::from_pixel(3, 3, image::Rgb([240, 180, 20]));
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let uri = format!("/admin/menu/{}/image/", item["id"]);
    let (status, updated) = t
        .send(multipart_request(&uri, &t.token, "file", "thali.png", &png))
        .await;
    assert_eq!(status, StatusCode::OK);
    let url = updated["image"].as_str().unwrap();
    assert!(url.starts_with("/media/menu_items/") && url.ends_with(".jpg"));

    let (status, _) = t.get(url, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = t
        .send(multipart_request(&uri, &t.token, "file", "thali.gif", &png))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

#[tokio::test]
async fn test_settings_update() {
    let t = spawn().await;

    let (status, body) = t
        .admin(Method::PUT, "/admin/settings/", Some(json!({"primary_color": "blue"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    let (status, settings) = t
        .admin(
            Method::PUT,
            "/admin/settings/",
            Some(json!({"primary_color": "#AA0000", "font_choice": "Lora", "cuisine": "Indian"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["primary_color"], "#aa0000");

    let (status, public) = t
        .get(&format!("/api/restaurants/{}/settings/", t.restaurant_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public["font_choice"], "Lora");
    assert_eq!(public["cuisine"], "Indian");
    assert_eq!(public["name"], "Spice Route");

    let (status, body) = t.get("/api/restaurants/424242/settings/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_category_delete_keeps_items() {
    let t = spawn().await;
    let (_, drinks) = t
        .admin(Method::POST, "/admin/categories/", Some(json!({"name": "Drinks"})))
        .await;
    let (_, lassi) = t
        .admin(
            Method::POST,
            "/admin/menu/",
            Some(json!({"name": "Lassi", "price": 3.0, "category_id": drinks["id"]})),
        )
        .await;

    let (status, _) = t
        .admin(Method::DELETE, &format!("/admin/categories/{}/", drinks["id"]), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, item) = t
        .admin(Method::GET, &format!("/admin/menu/{}/", lassi["id"]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(item["category_id"].is_null());

    let (status, body) = t
        .admin(
            Method::POST,
            "/admin/menu/",
            Some(json!({"name": "Soda", "price": 2.0, "category_id": drinks["id"]})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6101);
}
