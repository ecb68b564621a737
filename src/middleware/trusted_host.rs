/// Host-header allow-list middleware
///
/// Rejects requests whose `Host` header is not in the configured allow-list
/// with 400. A `"*"` entry (or an empty list) disables the check.
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorBadRequest,
    Error,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Trusted-host middleware factory
pub struct TrustedHost {
    allowed: Rc<Vec<String>>,
}

impl TrustedHost {
    pub fn new(hosts: Vec<String>) -> Self {
        Self {
            allowed: Rc::new(hosts),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TrustedHost
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TrustedHostService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(TrustedHostService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct TrustedHostService<S> {
    service: Rc<S>,
    allowed: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for TrustedHostService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            // Copy the host out before handing the request on.
            let host = {
                let info = req.connection_info();
                host_without_port(info.host()).to_string()
            };

            let permitted = allowed.is_empty()
                || allowed
                    .iter()
                    .any(|entry| entry == "*" || entry.eq_ignore_ascii_case(&host));

            if !permitted {
                tracing::warn!(host = %host, "request from untrusted host rejected");
                return Err(ErrorBadRequest("Invalid host header"));
            }

            service.call(req).await
        })
    }
}

fn host_without_port(value: &str) -> &str {
    let host = match value.rsplit_once(':') {
        Some((head, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => head,
        _ => value,
    };
    host.trim_start_matches('[').trim_end_matches(']')
}
