// API layer - HTTP endpoints
pub mod alerts;
pub mod auth;
pub mod device_access;
pub mod devices;
pub mod health;

use std::net::IpAddr;

pub use alerts::AlertsApi;
pub use auth::AuthApi;
pub use device_access::DeviceAccessApi;
pub use devices::DevicesApi;
pub use health::HealthApi;

use poem::Request;

pub trait Api {
    fn extract_ip_address(&self, req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        // Fall back to remote address
        req.remote_addr()
            .as_socket_addr()
            .map(|addr| addr.ip())
    }

    fn extract_user_agent(&self, req: &Request) -> Option<String> {
        req.header("User-Agent").map(str::to_string)
    }
}
