//! Self-contained Three.js page export.
//!
//! [`ScenePage`] writes the scene out as a single HTML document that loads
//! Three.js from a CDN and animates it in the browser: same meshes, light and
//! camera, a `setInterval` mock telemetry feed, the per-frame update and a
//! resize listener. Timing and scale constants come from [`VizConfig`].

use std::fmt::Write;
use std::path::Path;

use tracing::info;

use crate::config::VizConfig;
use crate::core_types::AirflowSample;
use crate::error::{VizError, VizResult};
use crate::scene::{Geometry, HvacScene, Material, Mesh, PointLight};

/// HTML page builder for an [`HvacScene`].
pub struct ScenePage<'a> {
    title: String,
    scene: &'a HvacScene,
    config: &'a VizConfig,
    initial_sample: AirflowSample,
}

impl<'a> ScenePage<'a> {
    pub fn new(scene: &'a HvacScene, config: &'a VizConfig) -> Self {
        Self {
            title: "3D HVAC Model".to_string(),
            scene,
            config,
            initial_sample: AirflowSample::default(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sample the page shows until its own timer fires the first time.
    pub fn with_initial_sample(mut self, sample: AirflowSample) -> Self {
        self.initial_sample = sample;
        self
    }

    /// Emit the complete HTML document.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);

        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ margin: 0; }}
        canvas {{ display: block; }}
    </style>
</head>
<body>
    <script src="{url}"></script>
    <script>
"#,
            title = escape_html(&self.title),
            url = escape_html(&self.config.three_js_url),
        );

        html.push_str(&self.build_js());
        html.push_str("    </script>\n</body>\n</html>\n");
        html
    }

    /// Write the document to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> VizResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render()).map_err(|e| VizError::io(path, e))?;
        info!("Wrote scene page to {}", path.display());
        Ok(())
    }

    fn build_js(&self) -> String {
        let mut js = String::with_capacity(2048);
        let camera = &self.scene.camera;

        // Telemetry stand-in
        let _ = write!(
            js,
            r"const airflowData = {{ speed: {speed}, direction: '{direction}' }};
setInterval(() => {{
    airflowData.speed = Math.random();
    airflowData.direction = Math.random() > 0.5 ? 'left' : 'right';
}}, {interval});

const clock = new THREE.Clock();
const scene = new THREE.Scene();
const camera = new THREE.PerspectiveCamera({fov}, window.innerWidth / window.innerHeight, {near}, {far});
camera.position.set({cx}, {cy}, {cz});
const renderer = new THREE.WebGLRenderer();
renderer.setSize(window.innerWidth, window.innerHeight);
document.body.appendChild(renderer.domElement);
",
            speed = self.initial_sample.speed,
            direction = self.initial_sample.direction,
            interval = self.config.telemetry_interval_ms,
            fov = *camera.fov(),
            near = camera.near(),
            far = camera.far(),
            cx = camera.position.x,
            cy = camera.position.y,
            cz = camera.position.z,
        );

        build_mesh_js(&mut js, "duct", &self.scene.duct);
        build_mesh_js(&mut js, "airflow", &self.scene.indicator);
        build_light_js(&mut js, &self.scene.light);

        let _ = write!(
            js,
            r"
function animate() {{
    const delta = clock.getDelta();
    duct.rotation.y += delta * {rate};
    airflow.position.x = airflowData.speed * {scale};
    airflow.rotation.z = airflowData.direction === 'left' ? Math.PI / 4 : -Math.PI / 4;
    renderer.render(scene, camera);
    requestAnimationFrame(animate);
}}

window.addEventListener('resize', () => {{
    camera.aspect = window.innerWidth / window.innerHeight;
    camera.updateProjectionMatrix();
    renderer.setSize(window.innerWidth, window.innerHeight);
}});

animate();
",
            rate = *self.config.duct_angular_rate,
            scale = self.config.speed_scale,
        );

        js
    }
}

fn build_mesh_js(js: &mut String, var: &str, mesh: &Mesh) {
    let geometry = match mesh.geometry {
        Geometry::Box {
            width,
            height,
            depth,
        } => format!("new THREE.BoxGeometry({width}, {height}, {depth})"),
        Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => format!(
            "new THREE.CylinderGeometry({radius_top}, {radius_bottom}, {height}, {radial_segments})"
        ),
    };

    let material = match mesh.material {
        Material::Lambert { color } => format!("new THREE.MeshLambertMaterial({{ color: {color} }})"),
        Material::Basic {
            color,
            opacity,
            transparent,
        } => format!(
            "new THREE.MeshBasicMaterial({{ color: {color}, transparent: {transparent}, opacity: {opacity} }})"
        ),
    };

    let t = &mesh.transform;
    let _ = write!(
        js,
        r"const {var} = new THREE.Mesh({geometry}, {material});
{var}.name = '{name}';
{var}.position.set({px}, {py}, {pz});
{var}.rotation.set({rx}, {ry}, {rz});
scene.add({var});
",
        name = escape_js(&mesh.name),
        px = t.position.x,
        py = t.position.y,
        pz = t.position.z,
        rx = t.rotation.x,
        ry = t.rotation.y,
        rz = t.rotation.z,
    );
}

fn build_light_js(js: &mut String, light: &PointLight) {
    let _ = write!(
        js,
        r"const light = new THREE.PointLight({color}, {intensity}, {distance});
light.position.set({x}, {y}, {z});
scene.add(light);
",
        color = light.color,
        intensity = light.intensity,
        distance = light.distance,
        x = light.position.x,
        y = light.position.y,
        z = light.position.z,
    );
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "\\x3c")
}
