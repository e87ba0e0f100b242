//! Built-in default values for every setting.
//!
//! Empty strings stand in for "not configured".

#![allow(missing_docs)]

pub mod async_pool {
    pub const CORE_POOL_SIZE: i32 = 2;
    pub const MAX_POOL_SIZE: i32 = 50;
    pub const QUEUE_CAPACITY: i32 = 10_000;
}

pub mod http {
    use crate::HttpVersion;

    pub const VERSION: HttpVersion = HttpVersion::V1_1;
    pub const USE_UNDERTOW_USER_CIPHER_SUITES_ORDER: bool = true;
    pub const CACHE_TIME_TO_LIVE_IN_DAYS: i32 = 1461;
}

pub mod cache {
    pub mod hazelcast {
        pub const TIME_TO_LIVE_SECONDS: i32 = 3600;
        pub const BACKUP_COUNT: i32 = 1;
        pub const MANAGEMENT_CENTER_ENABLED: bool = false;
        pub const MANAGEMENT_CENTER_UPDATE_INTERVAL: i32 = 3;
        pub const MANAGEMENT_CENTER_URL: &str = "";
    }

    pub mod ehcache {
        pub const TIME_TO_LIVE_SECONDS: i32 = 3600;
        pub const MAX_ENTRIES: i64 = 100;
    }

    pub mod infinispan {
        pub const CONFIG_FILE: &str = "default-configs/default-jgroups-tcp.xml";
        pub const STATS_ENABLED: bool = false;
        pub const TIME_TO_LIVE_SECONDS: i64 = 60;
        pub const MAX_ENTRIES: i64 = 100;
        pub const INSTANCE_COUNT: i32 = 1;
    }

    pub mod memcached {
        pub const ENABLED: bool = false;
        pub const SERVERS: &str = "localhost:11211";
        pub const EXPIRATION: i32 = 300;
        pub const USE_BINARY_PROTOCOL: bool = true;
    }
}

pub mod mail {
    pub const ENABLED: bool = false;
    pub const FROM: &str = "";
    pub const BASE_URL: &str = "";
}

pub mod security {
    pub const JWT_SECRET: &str = "";
    pub const TOKEN_VALIDITY_IN_SECONDS: i64 = 1800;
    pub const TOKEN_VALIDITY_IN_SECONDS_FOR_REMEMBER_ME: i64 = 2_592_000;
    pub const REMEMBER_ME_KEY: &str = "";
}

pub mod swagger {
    pub const TITLE: &str = "Application API";
    pub const DESCRIPTION: &str = "API documentation";
    pub const VERSION: &str = "0.0.1";
    pub const DEFAULT_INCLUDE_PATTERN: &str = "/api/.*";
    pub const USE_DEFAULT_RESPONSE_MESSAGES: bool = true;
}

pub mod metrics {
    pub const JMX_ENABLED: bool = true;
    pub const LOGS_ENABLED: bool = false;
    pub const LOGS_REPORT_FREQUENCY: i64 = 60;
    pub const GRAPHITE_ENABLED: bool = false;
    pub const GRAPHITE_HOST: &str = "localhost";
    pub const GRAPHITE_PORT: i32 = 2003;
    pub const GRAPHITE_PREFIX: &str = "simlifeApplication";
    pub const PROMETHEUS_ENABLED: bool = false;
    pub const PROMETHEUS_ENDPOINT: &str = "/prometheusMetrics";
}

pub mod logging {
    pub const LOGSTASH_ENABLED: bool = false;
    pub const LOGSTASH_HOST: &str = "localhost";
    pub const LOGSTASH_PORT: i32 = 5000;
    pub const LOGSTASH_QUEUE_SIZE: i32 = 512;
}

pub mod cors {
    pub const ALLOW_CREDENTIALS: bool = false;
    pub const MAX_AGE: i64 = 1800;
}

pub mod social {
    pub const REDIRECT_AFTER_SIGN_IN: &str = "/#/home";
}

pub mod gateway {
    pub const RATE_LIMITING_ENABLED: bool = false;
    pub const RATE_LIMITING_LIMIT: i64 = 100_000;
    pub const RATE_LIMITING_DURATION_IN_SECONDS: i32 = 3600;
}
