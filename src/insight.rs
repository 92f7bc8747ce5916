//! Hand-written interpretation of the offline clustering run.
//!
//! These figures were produced once, outside this program, from the cleaned
//! flight dataset. They are constants: loading a different or updated dataset
//! does NOT change them, so they can drift out of date relative to whatever
//! data is currently loaded. Compare with
//! [`crate::analyzers::clusters::cluster_proportion`], which is computed live.

use serde::Serialize;

/// Per-cluster averages recorded from the offline segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster_id: u32,
    pub avg_price: f64,
    pub avg_duration_hrs: f64,
    pub avg_days_left: f64,
}

/// Interpretation of one segment: who it is and what to offer them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub cluster_id: u32,
    pub label: &'static str,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Promo {
    pub name: &'static str,
    pub description: &'static str,
}

pub static CLUSTER_SUMMARY: [ClusterSummary; 4] = [
    ClusterSummary {
        cluster_id: 0,
        avg_price: 9044.14,
        avg_duration_hrs: 7.86,
        avg_days_left: 14.38,
    },
    ClusterSummary {
        cluster_id: 1,
        avg_price: 5879.75,
        avg_duration_hrs: 8.09,
        avg_days_left: 38.16,
    },
    ClusterSummary {
        cluster_id: 2,
        avg_price: 55404.51,
        avg_duration_hrs: 14.71,
        avg_days_left: 25.79,
    },
    ClusterSummary {
        cluster_id: 3,
        avg_price: 8439.32,
        avg_duration_hrs: 21.98,
        avg_days_left: 24.72,
    },
];

pub static SEGMENTS: [Segment; 4] = [
    Segment {
        cluster_id: 0,
        label: "Last-minute mid-range travelers",
        recommendation: "Upselling & Fast-Track Access",
    },
    Segment {
        cluster_id: 1,
        label: "Budget leisure planners",
        recommendation: "Early-bird, Flash Sales, Group Bundles",
    },
    Segment {
        cluster_id: 2,
        label: "Premium long-haul travelers",
        recommendation: "Loyalty Programs, Lounge Access, Concierge",
    },
    Segment {
        cluster_id: 3,
        label: "Budget long-stay travelers",
        recommendation: "Long-stay Promos, Accommodation Bundles",
    },
];

pub static PROMOS: [Promo; 3] = [
    Promo {
        name: "Weekend Flash Sale",
        description: "For routes like Delhi and Mumbai.",
    },
    Promo {
        name: "Midnight Deal",
        description: "Targeting flyers between 1–3 AM.",
    },
    Promo {
        name: "Early Bird Discount",
        description: "Book 60+ days early, get 20% off.",
    },
];

pub fn summary_for(cluster_id: u32) -> Option<&'static ClusterSummary> {
    CLUSTER_SUMMARY.iter().find(|s| s.cluster_id == cluster_id)
}

pub fn segment_for(cluster_id: u32) -> Option<&'static Segment> {
    SEGMENTS.iter().find(|s| s.cluster_id == cluster_id)
}
