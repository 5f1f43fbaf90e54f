use serde_json::Value;

/// Collects route paths from client-side router objects left on the page's
/// global scope (Vue / Nuxt, Next.js build manifest, Remix manifest, and the
/// plain `window.routes` / `window.__ROUTES__` arrays many apps expose).
/// Evaluates to an array of strings; each probe is isolated so one broken
/// global does not hide the others.
pub const ROUTER_PROBE: &str = r#"(() => {
  const out = [];
  const push = (p) => { if (typeof p === 'string' && p.length > 0) out.push(p); };
  const walk = (routes, prefix) => {
    if (!Array.isArray(routes)) return;
    for (const r of routes) {
      if (!r) continue;
      if (typeof r === 'string') { push(r); continue; }
      if (typeof r.path !== 'string') continue;
      const full = r.path.startsWith('/') ? r.path : prefix.replace(/\/$/, '') + '/' + r.path;
      push(full);
      walk(r.children, full);
    }
  };
  const probes = [
    () => {
      const el = document.querySelector('#app, #__nuxt, [data-v-app]');
      const app = el && el.__vue_app__;
      const router = (app && app.config.globalProperties.$router) || window.$router || (window.$nuxt && window.$nuxt.$router);
      if (!router) return;
      if (typeof router.getRoutes === 'function') router.getRoutes().forEach((r) => push(r.path));
      else if (router.options) walk(router.options.routes, '');
    },
    () => {
      const el = document.querySelector('#app');
      const router = el && el.__vue__ && el.__vue__.$router;
      if (router && router.options) walk(router.options.routes, '');
    },
    () => {
      const data = window.__NEXT_DATA__;
      if (data && typeof data.page === 'string') push(data.page);
      const manifest = window.__BUILD_MANIFEST;
      if (manifest && Array.isArray(manifest.sortedPages)) manifest.sortedPages.forEach(push);
    },
    () => {
      const manifest = window.__remixManifest;
      if (!manifest || !manifest.routes) return;
      Object.values(manifest.routes).forEach((r) => {
        if (r && typeof r.path === 'string') push('/' + r.path.replace(/^\//, ''));
      });
    },
    () => ['__ROUTES__', '__routes', 'routes'].forEach((k) => walk(window[k], '')),
  ];
  for (const probe of probes) {
    try { probe(); } catch (e) { /* next probe */ }
  }
  return out;
})()"#;

/// Accepts the probe's array result; anything else yields nothing.
pub fn parse_router_paths(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
