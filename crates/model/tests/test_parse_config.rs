use kube::Resource;
use stunner_gateway_model::{certificate_refs, parent_refs, Gateway, ListenerProtocol, StunnerConfig, TlsMode, UdpRoute};

#[test]
fn test_parse_config() {
    let file = include_str!("test_parse_config/stunnerd.toml");
    let parse_result = toml::from_str::<StunnerConfig>(file);
    match parse_result {
        Ok(result) => {
            println!("{:#?}", result);
            assert_eq!(result.admin.loglevel, "all:DEBUG");
            assert_eq!(result.auth.credentials.get("username").map(String::as_str), Some("user-1"));
            assert_eq!(result.listeners.len(), 1);
            let listener = &result.listeners[0];
            assert_eq!(listener.protocol, ListenerProtocol::Udp);
            assert_eq!(listener.public_port, 1234);
            assert!(listener.cert.is_empty());
            assert_eq!(result.clusters[0].endpoints, vec!["10.0.0.1".to_string()]);
        }
        Err(e) => {
            eprintln!("{}", e);
            if let Some(span) = e.span() {
                let bytes = file.as_bytes();
                let span_str = std::str::from_utf8(&bytes[span]).unwrap();
                eprintln!("{}", span_str);
            }
            panic!();
        }
    }
}

#[test]
fn test_parse_gateway() {
    let gateway: Gateway = serde_json::from_str(include_str!("test_parse_config/gateway.json")).expect("fail to parse gateway");
    assert_eq!(gateway.metadata.generation, Some(3));
    assert_eq!(gateway.spec.gateway_class_name, "gatewayclass-ok");
    assert_eq!(gateway.spec.listeners.len(), 2);
    let tls = gateway.spec.listeners[1].tls.as_ref().expect("tls block");
    // absent mode defaults to terminate
    assert_eq!(TlsMode::of(tls), Some(TlsMode::Terminate));
    assert_eq!(certificate_refs(tls)[0].name, "tls-secret");
    assert!(gateway.status.is_none());
}

#[test]
fn test_parse_udp_route() {
    let route: UdpRoute = serde_json::from_str(include_str!("test_parse_config/udp_route.json")).expect("fail to parse udp route");
    assert_eq!(UdpRoute::kind(&()), "UDPRoute");
    assert_eq!(UdpRoute::api_version(&()), "gateway.networking.k8s.io/v1alpha2");
    let parents = parent_refs(&route);
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].section_name.as_deref(), Some("gateway-1-listener-udp"));
    let backend = &route.spec.rules[0].backend_refs[0];
    assert_eq!(backend.inner.name, "testservice-ok");
    assert_eq!(backend.inner.port, Some(1));
    assert!(route.status.is_none());
}

#[test]
fn test_serialize_omits_empty_tls_material() {
    let file = include_str!("test_parse_config/stunnerd.toml");
    let config = toml::from_str::<StunnerConfig>(file).expect("fail to parse");
    let json = serde_json::to_value(&config.listeners[0]).expect("fail to serialize");
    assert!(json.get("cert").is_none());
    assert!(json.get("key").is_none());
    assert_eq!(json["public_address"], "1.2.3.4");
}
