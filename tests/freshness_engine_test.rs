// ==========================================
// FreshnessClassifier 引擎集成测试
// ==========================================
// 测试目标: 验证新鲜度等级判定、统计、筛选与提醒计划
// 覆盖范围: fresh / expiring-soon / expired 三级边界
// ==========================================


use chrono::Duration;
use expiry_tracker::config::ReminderSettings;
use expiry_tracker::domain::types::{FreshnessTier, StatusFilter};
use expiry_tracker::engine::{
    classify, FreshnessClassifier, ProductQuery, ReminderPlanner, DEFAULT_THRESHOLD_DAYS,
};
use test_helpers::{base_now, utc, ymd, ProductBuilder};

// ==========================================
// 第一部分: 等级边界
// ==========================================

#[test]
fn test_default_threshold_boundaries() {
    let now = base_now();
    assert_eq!(DEFAULT_THRESHOLD_DAYS, 7);
    assert_eq!(classify(utc(2024, 1, 8, 0, 0), DEFAULT_THRESHOLD_DAYS, now), FreshnessTier::ExpiringSoon);
    assert_eq!(classify(utc(2024, 1, 9, 0, 0), DEFAULT_THRESHOLD_DAYS, now), FreshnessTier::Fresh);
    assert_eq!(classify(utc(2023, 12, 31, 0, 0), DEFAULT_THRESHOLD_DAYS, now), FreshnessTier::Expired);
}

#[test]
fn test_boundary_moves_with_time_of_day() {
    // now 带时分: 边界按 now 起算的整 24 小时
    let now = utc(2024, 1, 1, 18, 0);
    let expiry = utc(2024, 1, 8, 0, 0);
    assert_eq!(FreshnessClassifier::diff_days(expiry, now), 7); // 6.25 天向上取整
    assert_eq!(classify(expiry, 7, now), FreshnessTier::ExpiringSoon);

    let expiry = utc(2024, 1, 8, 18, 1);
    assert_eq!(FreshnessClassifier::diff_days(expiry, now), 8);
    assert_eq!(classify(expiry, 7, now), FreshnessTier::Fresh);
}

#[test]
fn test_same_day_expiry_is_not_expired_yet() {
    // 到期日当天 00:00 已过去若干小时,向上取整后仍为 0
    let now = utc(2024, 1, 1, 15, 30);
    let expiry = utc(2024, 1, 1, 0, 0);
    assert_eq!(classify(expiry, 7, now), FreshnessTier::ExpiringSoon);

    let expiry = now - Duration::days(1) - Duration::milliseconds(1);
    assert_eq!(classify(expiry, 7, now), FreshnessTier::Expired);
}

#[test]
fn test_threshold_range() {
    let now = base_now();
    let expiry = utc(2024, 1, 31, 0, 0); // 30 天后
    assert_eq!(classify(expiry, 1, now), FreshnessTier::Fresh);
    assert_eq!(classify(expiry, 29, now), FreshnessTier::Fresh);
    assert_eq!(classify(expiry, 30, now), FreshnessTier::ExpiringSoon);
    assert_eq!(classify(expiry, 365, now), FreshnessTier::ExpiringSoon);
}

#[test]
fn test_classification_is_idempotent() {
    let classifier = FreshnessClassifier::new();
    let now = base_now();
    for offset in -48..=240 {
        let expiry = now + Duration::hours(offset);
        let first = classifier.classify(expiry, 7, now);
        let second = classifier.classify(expiry, 7, now);
        assert_eq!(first, second);
    }
}

#[test]
fn test_tiers_are_monotonic_in_expiry() {
    // 到期越晚,等级只会 Expired → ExpiringSoon → Fresh 单向变化
    let rank = |t: FreshnessTier| match t {
        FreshnessTier::Expired => 0,
        FreshnessTier::ExpiringSoon => 1,
        FreshnessTier::Fresh => 2,
    };
    let now = base_now();
    let mut last = 0;
    for offset in -72..=400 {
        let r = rank(classify(now + Duration::hours(offset), 7, now));
        assert!(r >= last, "offset={}", offset);
        last = r;
    }
}

// ==========================================
// 第二部分: 列表统计与筛选
// ==========================================

#[test]
fn test_dashboard_counts_和筛选() {
    let products = vec![
        ProductBuilder::new("1").name("Whole Milk").expires_on(ymd(2024, 1, 4)).build(),
        ProductBuilder::new("2").name("Basmati Rice").expires_on(ymd(2025, 3, 1)).build(),
        ProductBuilder::new("3").name("Greek Yogurt").expires_on(ymd(2023, 12, 28)).build(),
        ProductBuilder::new("4").name("Milk Chocolate").expires_on(ymd(2024, 8, 1)).build(),
        ProductBuilder::new("5").name("Eggs").expires_at(base_now()).build(),
    ];
    let classifier = FreshnessClassifier::new();
    let now = base_now();

    let summary = classifier.summarize(&products, 7, now);
    assert_eq!(summary.fresh, 2);
    assert_eq!(summary.expiring_soon, 2);
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.total, products.len());

    let query = ProductQuery::new("milk", StatusFilter::All);
    let ids: Vec<_> = classifier
        .filter_products(&products, &query, 7, now)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "4"]);

    let query = ProductQuery::new("", "expiring-soon".parse().unwrap());
    let ids: Vec<_> = classifier
        .filter_products(&products, &query, 7, now)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "5"]);
}

// ==========================================
// 第三部分: 提醒计划
// ==========================================

#[test]
fn test_reminder_plans_follow_settings() {
    let products = vec![
        ProductBuilder::new("a").expires_on(ymd(2024, 1, 31)).build(),
        ProductBuilder::new("b").expires_on(ymd(2024, 1, 5)).build(),
        ProductBuilder::new("c").expires_on(ymd(2024, 1, 16)).build(),
    ];
    let planner = ReminderPlanner::new();
    let settings = ReminderSettings {
        enabled: true,
        days_before_expiry: 14,
    };

    let plans = planner.plan(&products, &settings, base_now());
    let ids: Vec<_> = plans.iter().map(|p| p.product_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(plans[0].remind_at, utc(2024, 1, 17, 0, 0));
    assert_eq!(plans[1].remind_at, utc(2024, 1, 2, 0, 0));
}
