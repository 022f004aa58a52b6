mod common;

use bookam_core::{
    db::seed::{ADMIN_EMAIL, CUSTOMER_EMAIL},
    params::{Login, SearchRoutes},
    BookingApi, BookingError,
};

fn credentials(email: &str) -> Login {
    Login {
        email: email.to_string(),
        password: "ignored".to_string(),
    }
}

#[tokio::test]
async fn test_login_issues_local_token() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    let local = backend.as_local().unwrap();
    let summary = local.seed("2025-06-01".parse().unwrap()).await.unwrap();
    assert_eq!((summary.users, summary.buses, summary.routes), (2, 3, 6));

    let session = backend.login(&credentials(ADMIN_EMAIL)).await.unwrap();
    assert!(session.token.starts_with(&format!("local-{}-", session.user.id)));
    assert!(session.user.is_admin());

    let err = backend
        .login(&credentials("nobody@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Api { status: Some(401), .. }));
}

#[tokio::test]
async fn test_seed_runs_once() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    let local = backend.as_local().unwrap();
    local.seed("2025-06-01".parse().unwrap()).await.unwrap();
    let again = local.seed("2025-06-01".parse().unwrap()).await.unwrap();
    assert_eq!(again.buses, 0);
    assert_eq!(backend.list_buses().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_routes_by_city_and_date() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    backend
        .as_local()
        .unwrap()
        .seed("2025-06-01".parse().unwrap())
        .await
        .unwrap();

    let from_lagos = backend
        .search_routes(&SearchRoutes {
            from: Some("lagos".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(from_lagos.len(), 3);
    assert!(from_lagos.iter().all(|r| r.from_city == "Lagos"));

    let on_day_two = backend
        .search_routes(&SearchRoutes {
            date: Some("2025-06-03".parse().unwrap()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(on_day_two.len(), 2);

    assert!(matches!(
        backend.get_route(999).await,
        Err(BookingError::RouteNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_customer_token_scopes_booking_list() {
    let (_temp_dir, mut backend) = common::create_test_backend().await;
    backend
        .as_local()
        .unwrap()
        .seed("2025-06-01".parse().unwrap())
        .await
        .unwrap();
    let (_, route) = common::create_lagos_abuja(&backend).await;
    assert!(matches!(
        backend.list_bookings().await,
        Err(BookingError::Unauthorized)
    ));

    let session = backend.login(&credentials(CUSTOMER_EMAIL)).await.unwrap();
    backend.set_token(Some(session.token));
    assert!(backend.list_bookings().await.unwrap().is_empty());
    assert!(backend.taken_seats(route.id).await.unwrap().is_empty());
}
