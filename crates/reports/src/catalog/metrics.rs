//! Metric name lists per report family

/// Per-request metric limit of the integrated report endpoint
pub const MAX_METRICS_PER_REQUEST: usize = 100;

/// Core delivery and cost metrics
pub const BASIC_DATA_METRICS: &[&str] = &[
    "spend",
    "cpc",
    "cpm",
    "impressions",
    "clicks",
    "ctr",
    "reach",
    "cost_per_1000_reached",
    "conversion",
    "cost_per_conversion",
    "conversion_rate",
    "real_time_conversion",
    "real_time_cost_per_conversion",
    "real_time_conversion_rate",
    "result",
    "cost_per_result",
    "result_rate",
    "real_time_result",
    "real_time_cost_per_result",
    "real_time_result_rate",
    "secondary_goal_result",
    "cost_per_secondary_goal_result",
    "secondary_goal_result_rate",
    "frequency",
];

pub const VIDEO_PLAY_METRICS: &[&str] = &[
    "video_play_actions",
    "video_watched_2s",
    "video_watched_6s",
    "average_video_play",
    "average_video_play_per_user",
    "video_views_p25",
    "video_views_p50",
    "video_views_p75",
    "video_views_p100",
];

pub const ENGAGEMENT_METRICS: &[&str] = &[
    "profile_visits",
    "profile_visits_rate",
    "likes",
    "comments",
    "shares",
    "follows",
    "clicks_on_music_disc",
];

/// View-through and click-through attribution
pub const ATTRIBUTION_METRICS: &[&str] = &[
    "vta_app_install",
    "vta_conversion",
    "cost_per_vta_conversion",
    "vta_registration",
    "cost_per_vta_registration",
    "vta_purchase",
    "cost_per_vta_purchase",
    "cta_app_install",
    "cta_conversion",
    "cost_per_cta_conversion",
    "cta_registration",
    "cost_per_cta_registration",
    "cta_purchase",
    "cost_per_cta_purchase",
];

/// Website (pixel) event metrics
pub const PAGE_EVENT_METRICS: &[&str] = &[
    "complete_payment_roas",
    "complete_payment",
    "cost_per_complete_payment",
    "complete_payment_rate",
    "value_per_complete_payment",
    "total_complete_payment_rate",
    "page_browse_view",
    "cost_per_page_browse_view",
    "page_browse_view_rate",
    "total_page_browse_view_value",
    "value_per_page_browse_view",
    "button_click",
    "cost_per_button_click",
    "button_click_rate",
    "value_per_button_click",
    "total_button_click_value",
    "online_consult",
    "cost_per_online_consult",
    "online_consult_rate",
    "value_per_online_consult",
    "total_online_consult_value",
    "user_registration",
    "cost_per_user_registration",
    "user_registration_rate",
    "value_per_user_registration",
    "total_user_registration_value",
    "product_details_page_browse",
    "cost_per_product_details_page_browse",
    "product_details_page_browse_rate",
    "value_per_product_details_page_browse",
    "total_product_details_page_browse_value",
    "web_event_add_to_cart",
    "cost_per_web_event_add_to_cart",
    "web_event_add_to_cart_rate",
    "value_per_web_event_add_to_cart",
    "total_web_event_add_to_cart_value",
    "on_web_order",
    "cost_per_on_web_order",
    "on_web_order_rate",
    "value_per_on_web_order",
    "total_on_web_order_value",
    "initiate_checkout",
    "cost_per_initiate_checkout",
    "initiate_checkout_rate",
    "value_per_initiate_checkout",
    "total_initiate_checkout_value",
    "add_billing",
    "cost_per_add_billing",
    "add_billing_rate",
    "value_per_add_billing",
    "total_add_billing_value",
    "page_event_search",
    "cost_per_page_event_search",
    "page_event_search_rate",
    "value_per_page_event_search",
    "total_page_event_search_value",
    "form",
    "cost_per_form",
    "form_rate",
    "value_per_form",
    "total_form_value",
    "download_start",
    "cost_per_download_start",
    "download_start_rate",
    "value_per_download_start",
    "total_download_start_value",
    "on_web_add_to_wishlist",
    "cost_per_on_web_add_to_wishlist",
    "on_web_add_to_wishlist_per_click",
    "value_per_on_web_add_to_wishlist",
    "total_on_web_add_to_wishlist_value",
    "on_web_subscribe",
    "cost_per_on_web_subscribe",
    "on_web_subscribe_per_click",
    "value_per_on_web_subscribe",
    "total_on_web_subscribe_value",
];

/// App event metrics; exceeds the per-request metric limit
pub const IN_APP_EVENT_METRICS: &[&str] = &[
    "real_time_app_install",
    "real_time_app_install_cost",
    "app_install",
    "cost_per_app_install",
    "registration",
    "cost_per_registration",
    "registration_rate",
    "total_registration",
    "cost_per_total_registration",
    "purchase",
    "cost_per_purchase",
    "purchase_rate",
    "total_purchase",
    "cost_per_total_purchase",
    "value_per_total_purchase",
    "total_purchase_value",
    "total_active_pay_roas",
    "app_event_add_to_cart",
    "cost_per_app_event_add_to_cart",
    "app_event_add_to_cart_rate",
    "total_app_event_add_to_cart",
    "cost_per_total_app_event_add_to_cart",
    "value_per_total_app_event_add_to_cart",
    "total_app_event_add_to_cart_value",
    "checkout",
    "cost_per_checkout",
    "checkout_rate",
    "total_checkout",
    "cost_per_total_checkout",
    "value_per_checkout",
    "total_checkout_value",
    "view_content",
    "cost_per_view_content",
    "view_content_rate",
    "total_view_content",
    "cost_per_total_view_content",
    "value_per_total_view_content",
    "total_view_content_value",
    "next_day_open",
    "cost_per_next_day_open",
    "next_day_open_rate",
    "total_next_day_open",
    "cost_per_total_next_day_open",
    "add_payment_info",
    "cost_per_add_payment_info",
    "add_payment_info_rate",
    "total_add_payment_info",
    "cost_total_add_payment_info",
    "add_to_wishlist",
    "cost_per_add_to_wishlist",
    "add_to_wishlist_rate",
    "total_add_to_wishlist",
    "cost_per_total_add_to_wishlist",
    "value_per_total_add_to_wishlist",
    "total_add_to_wishlist_value",
    "launch_app",
    "cost_per_launch_app",
    "launch_app_rate",
    "total_launch_app",
    "cost_per_total_launch_app",
    "complete_tutorial",
    "cost_per_complete_tutorial",
    "complete_tutorial_rate",
    "total_complete_tutorial",
    "cost_per_total_complete_tutorial",
    "value_per_total_complete_tutorial",
    "total_complete_tutorial_value",
    "create_group",
    "cost_per_create_group",
    "create_group_rate",
    "total_create_group",
    "cost_per_total_create_group",
    "value_per_total_create_group",
    "total_create_group_value",
    "join_group",
    "cost_per_join_group",
    "join_group_rate",
    "total_join_group",
    "cost_per_total_join_group",
    "value_per_total_join_group",
    "total_join_group_value",
    "create_gamerole",
    "cost_per_create_gamerole",
    "create_gamerole_rate",
    "total_create_gamerole",
    "cost_per_total_create_gamerole",
    "value_per_total_create_gamerole",
    "total_create_gamerole_value",
    "spend_credits",
    "cost_per_spend_credits",
    "spend_credits_rate",
    "total_spend_credits",
    "cost_per_total_spend_credits",
    "value_per_total_spend_credits",
    "total_spend_credits_value",
    "achieve_level",
    "cost_per_achieve_level",
    "achieve_level_rate",
    "total_achieve_level",
    "cost_per_total_achieve_level",
    "value_per_total_achieve_level",
    "total_achieve_level_value",
    "unlock_achievement",
    "cost_per_unlock_achievement",
    "unlock_achievement_rate",
    "total_unlock_achievement",
    "cost_per_total_unlock_achievement",
    "value_per_total_unlock_achievement",
    "total_unlock_achievement_value",
    "sales_lead",
    "cost_per_sales_lead",
    "sales_lead_rate",
    "total_sales_lead",
    "cost_per_total_sales_lead",
    "value_per_total_sales_lead",
    "total_sales_lead_value",
    "in_app_ad_click",
    "cost_per_in_app_ad_click",
    "in_app_ad_click_rate",
    "total_in_app_ad_click",
    "cost_per_total_in_app_ad_click",
    "value_per_total_in_app_ad_click",
    "total_in_app_ad_click_value",
    "in_app_ad_impr",
    "cost_per_in_app_ad_impr",
    "in_app_ad_impr_rate",
    "total_in_app_ad_impr",
    "cost_per_total_in_app_ad_impr",
    "value_per_total_in_app_ad_impr",
    "total_in_app_ad_impr_value",
    "loan_apply",
    "cost_per_loan_apply",
    "loan_apply_rate",
    "total_loan_apply",
    "cost_per_total_loan_apply",
    "loan_credit",
    "cost_per_loan_credit",
    "loan_credit_rate",
    "total_loan_credit",
    "cost_per_total_loan_credit",
    "loan_disbursement",
    "cost_per_loan_disbursement",
    "loan_disbursement_rate",
    "total_loan_disbursement",
    "cost_per_total_loan_disbursement",
    "login",
    "cost_per_login",
    "login_rate",
    "total_login",
    "cost_per_total_login",
    "ratings",
    "cost_per_ratings",
    "ratings_rate",
    "total_ratings",
    "cost_per_total_ratings",
    "value_per_total_ratings",
    "total_ratings_value",
    "search",
    "cost_per_search",
    "search_rate",
    "total_search",
    "cost_per_total_search",
    "start_trial",
    "cost_per_start_trial",
    "start_trial_rate",
    "total_start_trial",
    "cost_per_total_start_trial",
    "subscribe",
    "cost_per_subscribe",
    "subscribe_rate",
    "total_subscribe",
    "cost_per_total_subscribe",
    "value_per_total_subscribe",
    "total_subscribe_value",
];

/// Lifetime ad attributes requested as metrics
pub const AD_ATTRIBUTE_METRICS: &[&str] = &[
    "campaign_name",
    "objective_type",
    "campaign_id",
    "adgroup_name",
    "placement_type",
    "adgroup_id",
    "ad_name",
    "ad_text",
    "tt_app_id",
    "tt_app_name",
    "mobile_app_id",
    "promotion_type",
    "dpa_target_audience_type",
];

/// Metrics available on audience reports
pub const AUDIENCE_METRICS: &[&str] = &[
    "spend",
    "cpc",
    "cpm",
    "impressions",
    "gross_impressions",
    "clicks",
    "ctr",
    "conversion",
    "cost_per_conversion",
    "conversion_rate",
    "real_time_conversion",
    "real_time_cost_per_conversion",
    "real_time_conversion_rate",
    "result",
    "cost_per_result",
    "result_rate",
    "real_time_result",
    "real_time_cost_per_result",
    "real_time_result_rate",
];
