use k8s_openapi::ByteString;
use stunner_gateway_config::service::{object_key, Store};
use stunner_gateway_model::{
    constants::{CORE_API_GROUP, SECRET_KIND, TLS_CERT_KEYS, TLS_KEY_KEYS, TLS_SECRET_TYPE},
    certificate_refs, Gateway, Listener, ListenerProtocol, Secret, TlsMode,
};

/// Certificate and private key of a terminating listener, PEM encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    pub cert: String,
    pub key: String,
}

/// Find the certificate and key for a listener.
///
/// Returns `None` when the listener does not terminate TLS or DTLS, or when none of its
/// certificate references resolves. References are tried in order and the first one
/// yielding both a certificate and a key wins.
pub fn resolve_tls<S: Store + ?Sized>(store: &S, gateway: &Gateway, listener: &Listener) -> Option<TlsMaterial> {
    let tls = listener.tls.as_ref()?;
    match TlsMode::of(tls) {
        Some(TlsMode::Terminate) => {}
        Some(mode) => {
            tracing::debug!("[SG.Tls] listener {}: tls mode is {mode}, nothing to terminate", listener.name);
            return None;
        }
        None => {
            tracing::warn!("[SG.Tls] listener {}: unknown tls mode {:?}", listener.name, tls.mode);
            return None;
        }
    }
    let protocol = listener.protocol.parse::<ListenerProtocol>().ok()?;
    if !protocol.is_secure() {
        tracing::debug!("[SG.Tls] listener {}: protocol {protocol} does not use tls", listener.name);
        return None;
    }
    let cert_refs = certificate_refs(tls);
    if cert_refs.len() > 1 {
        tracing::warn!("[SG.Tls] listener {}: {} certificate references, using the first one that resolves", listener.name, cert_refs.len());
    }

    let gateway_namespace = gateway.metadata.namespace.as_deref().unwrap_or_default();
    for cert_ref in cert_refs {
        if cert_ref.group.as_deref().is_some_and(|group| group != CORE_API_GROUP) {
            tracing::debug!("[SG.Tls] skip certificate reference {}: group {:?} is not the core group", cert_ref.name, cert_ref.group);
            continue;
        }
        if cert_ref.kind.as_deref().is_some_and(|kind| kind != SECRET_KIND) {
            tracing::debug!("[SG.Tls] skip certificate reference {}: kind {:?} is not a secret", cert_ref.name, cert_ref.kind);
            continue;
        }
        let namespace = cert_ref.namespace.as_deref().unwrap_or(gateway_namespace);
        let Some(secret) = store.get_secret(namespace, &cert_ref.name) else {
            tracing::debug!("[SG.Tls] skip certificate reference {namespace}/{}: secret not found", cert_ref.name);
            continue;
        };
        if secret.type_.as_deref() != Some(TLS_SECRET_TYPE) {
            tracing::warn!("[SG.Tls] secret {} has type {:?}, expected {TLS_SECRET_TYPE}", object_key::<Secret>(&secret), secret.type_);
        }
        match secret_material(&secret) {
            Some(material) => return Some(material),
            None => {
                tracing::debug!("[SG.Tls] skip secret {}: no usable certificate and key", object_key::<Secret>(&secret));
            }
        }
    }
    None
}

fn secret_material(secret: &Secret) -> Option<TlsMaterial> {
    let data = secret.data.as_ref()?;
    let lookup = |keys: &[&str]| keys.iter().find_map(|k| data.get(*k)).and_then(|ByteString(bytes)| String::from_utf8(bytes.clone()).ok());
    let cert = lookup(&TLS_CERT_KEYS[..])?;
    let key = lookup(&TLS_KEY_KEYS[..])?;
    Some(TlsMaterial { cert, key })
}

#[cfg(test)]
mod test {
    use std::{
        collections::BTreeMap,
        sync::{Arc, Mutex},
    };

    use stunner_gateway_config::service::memory::Memory;
    use stunner_gateway_model::*;

    use super::*;

    fn secret(name: &str, type_: &str, data: &[(&str, &str)]) -> Secret {
        let mut secret = Secret {
            type_: Some(type_.into()),
            data: Some(data.iter().map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec()))).collect::<BTreeMap<_, _>>()),
            ..Default::default()
        };
        secret.metadata.name = Some(name.into());
        secret.metadata.namespace = Some("testnamespace".into());
        secret
    }

    fn cert_ref(name: &str) -> SecretObjectReference {
        SecretObjectReference {
            name: name.into(),
            ..Default::default()
        }
    }

    fn tls_listener(refs: Vec<SecretObjectReference>) -> Listener {
        Listener {
            name: "gateway-1-listener-tls".into(),
            port: 3,
            protocol: "TURN-TLS".into(),
            hostname: None,
            tls: Some(GatewayTlsConfig {
                mode: None,
                certificate_refs: Some(refs),
                options: None,
            }),
            allowed_routes: None,
        }
    }

    fn gateway() -> Gateway {
        let mut gw = Gateway::new(
            "gateway-1",
            GatewaySpec {
                gateway_class_name: "gatewayclass-ok".into(),
                listeners: vec![],
                addresses: None,
            },
        );
        gw.metadata.namespace = Some("testnamespace".into());
        gw
    }

    /// Records every secret lookup before answering it from memory.
    #[derive(Default)]
    struct RecordingStore {
        inner: Memory,
        lookups: Mutex<Vec<String>>,
    }

    impl Store for RecordingStore {
        fn gateway_classes(&self) -> Vec<Arc<GatewayClass>> {
            self.inner.gateway_classes()
        }
        fn gateway_configs(&self) -> Vec<Arc<GatewayConfig>> {
            self.inner.gateway_configs()
        }
        fn gateways(&self) -> Vec<Arc<Gateway>> {
            self.inner.gateways()
        }
        fn udp_routes(&self) -> Vec<Arc<UdpRoute>> {
            self.inner.udp_routes()
        }
        fn secrets(&self) -> Vec<Arc<Secret>> {
            self.inner.secrets()
        }
        fn services(&self) -> Vec<Arc<Service>> {
            self.inner.services()
        }
        fn get_secret(&self, namespace: &str, name: &str) -> Option<Arc<Secret>> {
            self.lookups.lock().expect("lock").push(format!("{namespace}/{name}"));
            self.inner.get_secret(namespace, name)
        }
    }

    #[test]
    fn test_fallback_order() {
        let store = RecordingStore::default();
        store.inner.upsert(secret("secret-b", TLS_SECRET_TYPE, &[("tls.crt", "cert-b")]));
        store.inner.upsert(secret("secret-c", TLS_SECRET_TYPE, &[("tls.crt", "cert-c"), ("tls.key", "key-c")]));
        store.inner.upsert(secret("secret-d", TLS_SECRET_TYPE, &[("tls.crt", "cert-d"), ("tls.key", "key-d")]));
        let listener = tls_listener(vec![cert_ref("secret-a"), cert_ref("secret-b"), cert_ref("secret-c"), cert_ref("secret-d")]);
        let material = resolve_tls(&store, &gateway(), &listener).expect("material");
        assert_eq!(material.cert, "cert-c");
        assert_eq!(material.key, "key-c");
        // the lookup stops at the first reference that resolves
        let lookups = store.lookups.lock().expect("lock");
        assert_eq!(*lookups, ["testnamespace/secret-a", "testnamespace/secret-b", "testnamespace/secret-c"]);
    }

    #[test]
    fn test_unknown_tls_mode() {
        let store = Memory::new();
        store.upsert(secret("secret-a", TLS_SECRET_TYPE, &[("tls.crt", "cert-a"), ("tls.key", "key-a")]));
        let mut listener = tls_listener(vec![cert_ref("secret-a")]);
        if let Some(tls) = listener.tls.as_mut() {
            tls.mode = Some("dummy".into());
        }
        assert!(resolve_tls(&store, &gateway(), &listener).is_none());
    }

    #[test]
    fn test_key_aliases() {
        let store = Memory::new();
        store.upsert(secret("secret-a", TLS_SECRET_TYPE, &[("cert", "cert-a"), ("key", "key-a")]));
        let material = resolve_tls(&store, &gateway(), &tls_listener(vec![cert_ref("secret-a")])).expect("material");
        assert_eq!(material, TlsMaterial { cert: "cert-a".into(), key: "key-a".into() });
    }

    #[test]
    fn test_opaque_secret_is_accepted() {
        let store = Memory::new();
        store.upsert(secret("secret-a", "Opaque", &[("tls.crt", "cert-a"), ("tls.key", "key-a")]));
        assert!(resolve_tls(&store, &gateway(), &tls_listener(vec![cert_ref("secret-a")])).is_some());
    }

    #[test]
    fn test_wrong_group_or_kind_is_skipped() {
        let store = Memory::new();
        store.upsert(secret("secret-a", TLS_SECRET_TYPE, &[("tls.crt", "cert-a"), ("tls.key", "key-a")]));
        let mut by_group = cert_ref("secret-a");
        by_group.group = Some("example.com".into());
        let mut by_kind = cert_ref("secret-a");
        by_kind.kind = Some("ConfigMap".into());
        assert!(resolve_tls(&store, &gateway(), &tls_listener(vec![by_group, by_kind])).is_none());
        let mut explicit = cert_ref("secret-a");
        explicit.group = Some(String::new());
        explicit.kind = Some("Secret".into());
        assert!(resolve_tls(&store, &gateway(), &tls_listener(vec![explicit])).is_some());
    }

    #[test]
    fn test_no_termination() {
        let store = Memory::new();
        store.upsert(secret("secret-a", TLS_SECRET_TYPE, &[("tls.crt", "cert-a"), ("tls.key", "key-a")]));
        let mut passthrough = tls_listener(vec![cert_ref("secret-a")]);
        if let Some(tls) = passthrough.tls.as_mut() {
            tls.mode = Some("Passthrough".into());
        }
        assert!(resolve_tls(&store, &gateway(), &passthrough).is_none());
        let mut plain = tls_listener(vec![cert_ref("secret-a")]);
        plain.protocol = "TURN-UDP".into();
        assert!(resolve_tls(&store, &gateway(), &plain).is_none());
        let mut no_block = tls_listener(vec![]);
        no_block.tls = None;
        assert!(resolve_tls(&store, &gateway(), &no_block).is_none());
    }

    #[test]
    fn test_unresolvable_refs() {
        let store = Memory::new();
        assert!(resolve_tls(&store, &gateway(), &tls_listener(vec![cert_ref("missing")])).is_none());
    }
}
