use std::sync::{Arc, PoisonError};

use crossbeam_utils::sync::ShardedLock;
use stunner_gateway_model::*;

use super::{object_key, Store};

#[doc(hidden)]
#[derive(Debug, Default)]
pub struct Objects {
    gateway_classes: Vec<Arc<GatewayClass>>,
    gateway_configs: Vec<Arc<GatewayConfig>>,
    gateways: Vec<Arc<Gateway>>,
    udp_routes: Vec<Arc<UdpRoute>>,
    secrets: Vec<Arc<Secret>>,
    services: Vec<Arc<Service>>,
}

/// A kind of object the in-memory store can hold.
pub trait StoredObject: kube::Resource + Sized {
    #[doc(hidden)]
    fn slot(objects: &Objects) -> &Vec<Arc<Self>>;
    #[doc(hidden)]
    fn slot_mut(objects: &mut Objects) -> &mut Vec<Arc<Self>>;
}

macro_rules! stored_object {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl StoredObject for $ty {
                fn slot(objects: &Objects) -> &Vec<Arc<Self>> {
                    &objects.$field
                }
                fn slot_mut(objects: &mut Objects) -> &mut Vec<Arc<Self>> {
                    &mut objects.$field
                }
            }
        )*
    };
}

stored_object! {
    GatewayClass => gateway_classes,
    GatewayConfig => gateway_configs,
    Gateway => gateways,
    UdpRoute => udp_routes,
    Secret => secrets,
    Service => services,
}

/// In-memory object store.
///
/// Objects keep the position they were first inserted at; an upsert of a known key replaces
/// the object in place. Cloning the store shares the underlying objects.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    objects: Arc<ShardedLock<Objects>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let memory = Self::new();
        memory.load(snapshot);
        memory
    }

    /// Upsert every object of the snapshot.
    pub fn load(&self, snapshot: Snapshot) {
        let Snapshot {
            gateway_classes,
            gateway_configs,
            gateways,
            udp_routes,
            secrets,
            services,
        } = snapshot;
        gateway_classes.into_iter().for_each(|o| self.upsert(o));
        gateway_configs.into_iter().for_each(|o| self.upsert(o));
        gateways.into_iter().for_each(|o| self.upsert(o));
        udp_routes.into_iter().for_each(|o| self.upsert(o));
        secrets.into_iter().for_each(|o| self.upsert(o));
        services.into_iter().for_each(|o| self.upsert(o));
    }

    /// Insert an object, or replace the stored object with the same key.
    pub fn upsert<K: StoredObject>(&self, object: K) {
        let key = object_key(&object);
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let slot = K::slot_mut(&mut objects);
        match slot.iter_mut().find(|o| object_key::<K>(o) == key) {
            Some(stored) => {
                tracing::trace!("[SG.Store] replace {key}");
                *stored = Arc::new(object);
            }
            None => {
                tracing::trace!("[SG.Store] insert {key}");
                slot.push(Arc::new(object));
            }
        }
    }

    /// Remove an object by key (`namespace/name`, or `name` for cluster scoped kinds).
    pub fn remove<K: StoredObject>(&self, key: &str) -> Option<Arc<K>> {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let slot = K::slot_mut(&mut objects);
        let index = slot.iter().position(|o| object_key::<K>(o) == key)?;
        tracing::trace!("[SG.Store] remove {key}");
        Some(slot.remove(index))
    }

    fn list<K: StoredObject>(&self) -> Vec<Arc<K>> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        K::slot(&objects).clone()
    }
}

impl Store for Memory {
    fn gateway_classes(&self) -> Vec<Arc<GatewayClass>> {
        self.list()
    }
    fn gateway_configs(&self) -> Vec<Arc<GatewayConfig>> {
        self.list()
    }
    fn gateways(&self) -> Vec<Arc<Gateway>> {
        self.list()
    }
    fn udp_routes(&self) -> Vec<Arc<UdpRoute>> {
        self.list()
    }
    fn secrets(&self) -> Vec<Arc<Secret>> {
        self.list()
    }
    fn services(&self) -> Vec<Arc<Service>> {
        self.list()
    }
}
