pub const GATEWAY_API_GROUP: &str = "gateway.networking.k8s.io";
pub const GATEWAY_KIND: &str = "Gateway";
pub const UDP_ROUTE_KIND: &str = "UDPRoute";
pub const SECRET_KIND: &str = "Secret";
/// The core api group is the empty string
pub const CORE_API_GROUP: &str = "";

pub const STUNNER_API_GROUP: &str = "stunner.l7mp.io";
pub const GATEWAY_CONFIG_KIND: &str = "GatewayConfig";

pub const DEFAULT_CONTROLLER_NAME: &str = "stunner.l7mp.io/gateway-operator";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10;

/// Service annotation naming the gateway (`namespace/name`) a load balancer service fronts.
pub const RELATED_GATEWAY_ANNOTATION: &str = "stunner.l7mp.io/related-gateway-name";

pub const DEFAULT_CONFIG_MAP_NAME: &str = "stunnerd-config";
pub const DEFAULT_CONFIG_DATA_KEY: &str = "stunnerd.conf";

pub const DEFAULT_MIN_RELAY_PORT: i32 = 1 << 15;
pub const DEFAULT_MAX_RELAY_PORT: i32 = (1 << 16) - 1;
/// Resolved by stunnerd from its environment at runtime.
pub const DEFAULT_BIND_ADDRESS: &str = "$STUNNER_ADDR";

pub const DEFAULT_API_VERSION: &str = "v1alpha1";
pub const DEFAULT_ADMIN_NAME: &str = "stunner-daemon";
pub const DEFAULT_LOG_LEVEL: &str = "all:INFO";
pub const DEFAULT_REALM: &str = "stunner.l7mp.io";
pub const DEFAULT_AUTH_TYPE: &str = "plaintext";
pub const DEFAULT_USERNAME: &str = "user";
pub const DEFAULT_PASSWORD: &str = "pass";

pub const CLUSTER_TYPE_STATIC: &str = "STATIC";

pub const TLS_SECRET_TYPE: &str = "kubernetes.io/tls";
/// Data keys tried for the certificate, in order.
pub const TLS_CERT_KEYS: [&str; 3] = ["tls.crt", "crt", "cert"];
/// Data keys tried for the private key, in order.
pub const TLS_KEY_KEYS: [&str; 2] = ["tls.key", "key"];
